//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::services::render::DEFAULT_ZOOM_LEVEL;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the workout snapshot
    pub data_dir: PathBuf,
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Zoom level used when centering the map on a workout
    pub map_zoom_level: u8,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            map_zoom_level: DEFAULT_ZOOM_LEVEL,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            port: parse_var("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            map_zoom_level: parse_var("MAP_ZOOM_LEVEL", DEFAULT_ZOOM_LEVEL)?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
