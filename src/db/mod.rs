// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key-value storage for workout snapshots.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Storage keys as constants.
pub mod keys {
    /// Full snapshot of the workout collection
    pub const WORKOUTS: &str = "workouts";
}

/// A string-valued key-value slot store, the durable side of a session.
///
/// Every write replaces the previous value for the key in full.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value for `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Errors from the storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
