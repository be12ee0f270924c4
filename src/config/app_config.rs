use crate::repository::DEFAULT_COLLECTION;
use crate::services::error_handling::HafalanError;
use crate::services::search_paginator::DEFAULT_PAGE_SIZE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file holding the collection
    pub database_path: String,

    /// Collection the screens read and write
    pub collection: String,

    /// Records fetched per search page
    pub page_size: usize,

    /// Quiet period before a typed search is sent (in milliseconds)
    pub debounce_ms: u64,

    /// How close to the end of the list, in visible lengths, the next page is
    /// requested
    pub end_reached_threshold: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let database_path = dirs::data_dir()
            .map(|dir| dir.join("hafalan").join("hafalan.db"))
            .unwrap_or_else(|| PathBuf::from("hafalan.db"));

        Self {
            database_path: database_path.to_string_lossy().to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: 800,
            end_reached_threshold: 0.5,
        }
    }
}

impl AppConfig {
    /// Load configuration from the user config directory, writing the defaults
    /// on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            let default_config = Self::default();
            default_config.save_to(path)?;
            Ok(default_config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("hafalan").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(invalid("page_size must be at least 1"));
        }
        if self.collection.trim().is_empty() {
            return Err(invalid("collection must not be empty"));
        }
        if !self.end_reached_threshold.is_finite() || self.end_reached_threshold < 0.0 {
            return Err(invalid("end_reached_threshold must be a non-negative number"));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn invalid(message: &str) -> anyhow::Error {
    HafalanError::Configuration {
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.collection, "data_hafalan");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.debounce(), Duration::from_millis(800));
        assert_eq!(config.end_reached_threshold, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hafalan").join("config.toml");

        let config = AppConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = AppConfig {
            database_path: "/tmp/test.db".to_string(),
            page_size: 10,
            debounce_ms: 300,
            ..AppConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 8\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.page_size, 8);
        assert_eq!(config.debounce_ms, 800);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = 0\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());

        let config = AppConfig {
            end_reached_threshold: -1.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            collection: " ".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
