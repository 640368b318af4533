// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory storage for development and testing.
//!
//! Clones share the same underlying map, so a second store opened over a clone
//! sees what the first one wrote.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::db::{KeyValueStorage, StorageError};

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes whose total stored size would exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            slots: Arc::default(),
            quota: Some(quota),
        }
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("memory storage lock poisoned".to_string())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self.slots.read().map_err(|_| Self::poisoned())?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| Self::poisoned())?;

        if let Some(quota) = self.quota {
            let others: usize = slots
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.slots.write().map_err(|_| Self::poisoned())?;
        slots.remove(key);
        Ok(())
    }
}
