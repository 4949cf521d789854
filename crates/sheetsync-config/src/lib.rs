//! # sheetsync-config
//!
//! Layered configuration loading for sheetsync using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SHEETSYNC_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.sheetsync/config.toml`
//! 4. User-level `~/.config/sheetsync/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SHEETSYNC_SHEET__ID` -> `sheet.id`, `SHEETSYNC_OUTPUT__DIR` -> `output.dir`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use sheetsync_config::SyncConfig;
//!
//! let config = SyncConfig::load_with_dotenv(None).expect("config");
//! println!("exporting sheet {}", config.sheet.id);
//! ```

mod error;
mod fetch;
mod output;
mod publish;
mod sheet;
mod timetable;

pub use error::ConfigError;
pub use fetch::FetchConfig;
pub use output::{OutputConfig, OutputMode};
pub use publish::PublishConfig;
pub use sheet::{DEFAULT_SHEET_ID, SheetConfig};
pub use timetable::TimetableConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SyncConfig {
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub timetable: TimetableConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

impl SyncConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is invalid.
    pub fn load(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".sheetsync/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: --config file
        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("SHEETSYNC_").split("__"));

        figment
    }

    /// Reject values that would only fail later in the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] without a sheet id and
    /// [`ConfigError::InvalidValue`] for zero timeouts, zero slot thresholds or
    /// empty file names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sheet.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "sheet".into(),
            });
        }
        if self.fetch.timeout_secs == 0 {
            return Err(invalid("fetch.timeout_secs", "must be greater than zero"));
        }
        if self.timetable.min_slot_columns == 0 {
            return Err(invalid(
                "timetable.min_slot_columns",
                "must be greater than zero",
            ));
        }
        for (field, value) in [
            ("output.records_file", &self.output.records_file),
            ("output.timetable_file", &self.output.timetable_file),
            ("output.legend_file", &self.output.legend_file),
            ("output.error_file", &self.output.error_file),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(field, "file name must not be empty"));
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sheetsync").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SyncConfig::default();
        assert!(config.sheet.is_configured());
        assert!(!config.publish.enabled);
        assert_eq!(config.output.mode, OutputMode::Records);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = SyncConfig::figment(None);
        let config: SyncConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.fetch.timeout_secs, 30);
        assert_eq!(config.output.records_file, "sheet_backup.json");
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = SyncConfig::default();
        config.fetch.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "fetch.timeout_secs"));
    }

    #[test]
    fn empty_file_name_rejected() {
        let mut config = SyncConfig::default();
        config.output.error_file = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn blank_sheet_id_not_configured() {
        let mut config = SyncConfig::default();
        config.sheet.id = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
