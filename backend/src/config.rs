//! Engine configuration file support.
//!
//! The configuration only supplies defaults for the HTTP layer; every engine
//! entry point still takes its parameters explicitly.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::DatasetFilter;
use crate::services::reference::References;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "ENGINE_CONFIG";

/// Errors raised while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Engine configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Default ranking parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default = "default_variation_top_n")]
    pub variation_top_n: usize,
    #[serde(default = "default_sensor_cap")]
    pub sensor_cap: usize,
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
}

/// No-data sentinel locations dropped from every stored dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_excluded_districts")]
    pub excluded_districts: Vec<String>,
    #[serde(default = "default_excluded_regions")]
    pub excluded_regions: Vec<String>,
}

/// HTTP bind address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_top_n() -> usize {
    10
}

fn default_variation_top_n() -> usize {
    5
}

fn default_sensor_cap() -> usize {
    crate::services::ranking::SENSOR_DISPLAY_CAP
}

fn default_reference_prefix() -> String {
    References::DEFAULT_PREFIX.to_string()
}

fn default_excluded_districts() -> Vec<String> {
    vec!["Not_found".to_string()]
}

fn default_excluded_regions() -> Vec<String> {
    vec!["Île-de-france".to_string()]
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            variation_top_n: default_variation_top_n(),
            sensor_cap: default_sensor_cap(),
            reference_prefix: default_reference_prefix(),
        }
    }
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            excluded_districts: default_excluded_districts(),
            excluded_regions: default_excluded_regions(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl DatasetSettings {
    pub fn filter(&self) -> DatasetFilter {
        DatasetFilter {
            excluded_districts: self.excluded_districts.clone(),
            excluded_regions: self.excluded_regions.clone(),
        }
    }
}

impl RankingSettings {
    /// Reference list for one request, tagged with the configured prefix.
    pub fn references(&self, locations: Vec<String>) -> References {
        References {
            locations,
            prefix: self.reference_prefix.clone(),
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `engine.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("engine.toml"),
            PathBuf::from("backend/engine.toml"),
            PathBuf::from("../engine.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// `ENGINE_CONFIG` if set, else the default location, else built-in
    /// defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            tracing::info!(path = %path, "loading engine config from {}", CONFIG_ENV_VAR);
            return Self::from_file(path);
        }
        match Self::from_default_location()? {
            Some(config) => Ok(config),
            None => {
                tracing::info!("no engine.toml found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Apply `HOST`/`PORT` overrides looked up through `lookup`.
    pub fn with_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT '{}' is not a port number", port)))?;
        }
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ranking.sensor_cap == 0 {
            return Err(ConfigError::InvalidValue(
                "ranking.sensor_cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
