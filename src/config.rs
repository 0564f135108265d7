//! Configuration loading and validation.
//!
//! Sources, lowest precedence first: built-in defaults, the TOML file at
//! `~/.badge-kiosk/config.toml`, then `BADGE_KIOSK_` environment variables.
//! Nested keys use a double underscore, e.g. `BADGE_KIOSK_ADMIN__PASSCODE`.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::badge::DEFAULT_EVENT_TITLE;
use crate::db::{data_dir, default_db_path};
use crate::error::{Error, Result};
use crate::export::DEFAULT_ADMIN_BATCH_LIMIT;
use crate::notifier::DEFAULT_TIMEOUT_SECS;

const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "kiosk.log";
const ENV_PREFIX: &str = "BADGE_KIOSK_";

pub const DEFAULT_PASSCODE: &str = "0605";
pub const DEFAULT_MAX_INTEREST_CHARS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub admin: AdminConfig,
    pub export: ExportConfig,
    pub notifier: NotifierConfig,
    pub badge: BadgeConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Defaults to `~/.badge-kiosk/kiosk.sqlite`.
    pub database_path: Option<PathBuf>,
}

/// Operator dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared code that unlocks the dashboard.
    pub passcode: String,
    /// Most badges one admin print run may contain.
    pub batch_limit: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where CSV and PDF files land. Defaults to the current directory.
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Remote append endpoint; `None` disables notifications.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Footer line printed on every badge.
    pub event_title: String,
    pub max_interest_chars: usize,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            passcode: DEFAULT_PASSCODE.to_string(),
            batch_limit: DEFAULT_ADMIN_BATCH_LIMIT,
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            event_title: DEFAULT_EVENT_TITLE.to_string(),
            max_interest_chars: DEFAULT_MAX_INTEREST_CHARS,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, parsing or validation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path. A missing
    /// file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        data_dir().unwrap_or_else(|| PathBuf::from(crate::db::DATA_DIR_NAME))
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        Self::default_data_dir().join(CONFIG_FILE_NAME)
    }

    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.admin.passcode.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "admin.passcode must not be empty".to_string(),
            });
        }

        if self.admin.batch_limit == 0 {
            return Err(Error::ConfigValidation {
                message: "admin.batch_limit must be at least 1".to_string(),
            });
        }

        if self.badge.max_interest_chars == 0 {
            return Err(Error::ConfigValidation {
                message: "badge.max_interest_chars must be at least 1".to_string(),
            });
        }

        if self.notifier.timeout_secs == 0 {
            return Err(Error::ConfigValidation {
                message: "notifier.timeout_secs must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .or_else(default_db_path)
            .unwrap_or_else(|| Self::default_data_dir().join("kiosk.sqlite"))
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.database_path()
            .parent()
            .map(|dir| dir.join(LOG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    #[must_use]
    pub fn notifier_timeout(&self) -> Duration {
        Duration::from_secs(self.notifier.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.admin.passcode, "0605");
        assert_eq!(config.admin.batch_limit, 4);
        assert_eq!(config.badge.max_interest_chars, 10);
        assert_eq!(config.badge.event_title, "2026 Q1 VOLTUP TOWNHALL");
        assert!(config.notifier.endpoint.is_none());
        assert_eq!(config.notifier_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_batch_limit() {
        let mut config = Config::default();
        config.admin.batch_limit = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("batch_limit"));
    }

    #[test]
    fn test_validate_blank_passcode() {
        let mut config = Config::default();
        config.admin.passcode = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("passcode"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/kiosk.sqlite"));

        assert_eq!(config.database_path(), PathBuf::from("/custom/kiosk.sqlite"));
        assert_eq!(config.log_path(), PathBuf::from("/custom/kiosk.log"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[admin]\npasscode = \"4242\"\nbatch_limit = 8\n\n[badge]\nevent_title = \"SPRING MIXER\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.admin.passcode, "4242");
        assert_eq!(config.admin.batch_limit, 8);
        assert_eq!(config.badge.event_title, "SPRING MIXER");
        assert_eq!(config.badge.max_interest_chars, 10);
    }

    #[test]
    fn test_load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[admin]\nbatch_limit = 0\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.admin.batch_limit, 4);
    }
}
