// src/config/loader.rs
//! Layered configuration loader
//!
//! Sources, lowest precedence first: built-in defaults, the configuration files
//! that exist among the loader's paths, then `IIR_*` environment variables
//! (`IIR_BUTTERWORTH__ORDER=6`, `IIR_BANK__SAMPLING_FREQUENCY=2000`).

use crate::config::{constants::paths, FilterConfig};
use crate::error::FilterError;
use crate::processing::filter_bank::FilterBank;
use ::config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly requested file does not exist
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// Source could not be read or deserialized
    #[error("configuration parse error: {0}")]
    Parse(#[from] ::config::ConfigError),

    /// Configuration could not be written as TOML
    #[error("configuration serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A section describes a filter that cannot be designed
    #[error("invalid [{section}] configuration: {source}")]
    Invalid {
        section: String,
        #[source]
        source: FilterError,
    },

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigLoader {
    /// Loader over the default file locations
    pub fn new() -> Self {
        Self {
            config_paths: vec![
                PathBuf::from(paths::DEFAULT_CONFIG_FILE),
                PathBuf::from(paths::LOCAL_CONFIG_FILE),
            ],
        }
    }

    /// Loader with custom paths, later paths take precedence
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self { config_paths: paths }
    }

    /// Files consulted, lowest precedence first
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Load and validate the merged configuration.
    pub fn load(&self) -> Result<FilterConfig, ConfigError> {
        let mut builder = Self::defaults_builder()?;
        for path in &self.config_paths {
            builder = builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false));
        }
        let config = Self::finish(builder)?;
        Self::validate(&config)?;

        debug!(paths = ?self.config_paths, "configuration loaded");
        Ok(config)
    }

    /// Load a single file on top of the defaults; the file must exist.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<FilterConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let builder = Self::defaults_builder()?.add_source(File::from(path).format(FileFormat::Toml));
        let config = Self::finish(builder)?;
        Self::validate(&config)?;

        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Build every filter the configuration describes.
    pub fn validate(config: &FilterConfig) -> Result<(), ConfigError> {
        config
            .butterworth
            .build::<f64>()
            .map_err(|source| ConfigError::Invalid {
                section: "butterworth".to_string(),
                source,
            })?;
        FilterBank::<f64>::from_config(&config.bank).map_err(|source| ConfigError::Invalid {
            section: "bank".to_string(),
            source,
        })?;
        Ok(())
    }

    /// Export a configuration to a TOML file
    pub fn export<P: AsRef<Path>>(config: &FilterConfig, path: P) -> Result<(), ConfigError> {
        let toml_content = toml::to_string_pretty(config)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    fn defaults_builder() -> Result<::config::ConfigBuilder<::config::builder::DefaultState>, ConfigError> {
        let defaults = toml::to_string(&FilterConfig::default())?;
        Ok(Config::builder().add_source(File::from_str(&defaults, FileFormat::Toml)))
    }

    fn finish(
        builder: ::config::ConfigBuilder<::config::builder::DefaultState>,
    ) -> Result<FilterConfig, ConfigError> {
        let config = builder
            .add_source(
                Environment::with_prefix(paths::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator(paths::ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
