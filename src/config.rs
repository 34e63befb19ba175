//! Client configuration.
//!
//! Loaded from YAML files and `STREAMSTORE__*` environment variables.
//! Connection settings belong to the executor; this only carries what the
//! append contract itself consumes.

use std::time::Duration;

use serde::Deserialize;

use crate::error::Result;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "streamstore.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "STREAMSTORE_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "STREAMSTORE";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "STREAMSTORE_LOG";

/// Client configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Name reported in logs for this client.
    pub connection_name: String,
    /// Deadline applied to appends that do not set their own, in milliseconds.
    /// None = unbounded.
    pub default_deadline_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connection_name: "streamstore-client".to_string(),
            default_deadline_ms: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `streamstore.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Default append deadline, if configured.
    pub fn default_deadline(&self) -> Option<Duration> {
        self.default_deadline_ms.map(Duration::from_millis)
    }
}
