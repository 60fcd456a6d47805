//! Configuration module for the Niihau Trie crate.
//!
//! Settings are layered: built-in defaults first, then an optional file
//! (TOML, YAML, JSON), then environment variables. All configuration values
//! are validated for correctness before use.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::data_structures::niihau_trie::{NiihauTrieConfig, MAX_CHILD_CAPACITY};
use crate::error::config::ConfigError;
use crate::error::NiihauResult;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default configuration location
pub const DEFAULT_CONFIG_PATH: &str = "config/niihau.toml";

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "NIIHAU";

/// Where [`init_default_config`] found its settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The configuration file at this path was read.
    File(PathBuf),

    /// No file was present, so only defaults and environment variables apply.
    Defaults,
}

/// Initialize the default configuration.
///
/// This loads [`DEFAULT_CONFIG_PATH`] and merges it with any `NIIHAU__*`
/// environment variables, then installs the result as the global
/// configuration. A missing file is not an error; the returned
/// [`ConfigSource`] tells the caller so it can warn once logging is up.
///
/// # Returns
///
/// * `Ok((NiihauConfig, ConfigSource))` with the configuration that was installed globally
/// * `Err(ConfigError)` if the file or the environment holds invalid settings
pub fn init_default_config() -> ConfigResult<(NiihauConfig, ConfigSource)> {
    let loader = ConfigLoader::new(Some(DEFAULT_CONFIG_PATH), ENV_PREFIX);

    let (config, source) = match loader.load() {
        Ok(config) => (config, ConfigSource::File(PathBuf::from(DEFAULT_CONFIG_PATH))),
        Err(ConfigError::FileNotFound(_)) => (
            ConfigLoader::new(None::<&Path>, ENV_PREFIX).load()?,
            ConfigSource::Defaults,
        ),
        Err(e) => return Err(e),
    };

    init_global_config(config.clone());

    Ok((config, source))
}

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NiihauConfig {
    /// Trie construction settings
    pub trie: NiihauTrieConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for NiihauConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.trie.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

impl Validate for NiihauTrieConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.child_capacity > MAX_CHILD_CAPACITY {
            return Err(ConfigError::ValueOutOfRange {
                key: "trie.child_capacity".to_string(),
                message: format!(
                    "{} exceeds the maximum of {}",
                    self.child_capacity, MAX_CHILD_CAPACITY
                ),
            });
        }

        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to log in JSON format
    pub json: bool,

    /// Whether to include source code locations in logs
    pub source_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            source_location: true,
        }
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> ConfigResult<()> {
        match self.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}",
                self.level
            ))),
        }
    }
}

/// Configuration loader.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from a file and environment variables.
    ///
    /// Environment variables take the form `PREFIX__SECTION__FIELD`, for
    /// example `NIIHAU__LOG__LEVEL=debug`.
    ///
    /// # Returns
    ///
    /// * `Ok(NiihauConfig)` if the configuration was loaded successfully
    /// * `Err(ConfigError)` if there was an error loading the configuration
    pub fn load(&self) -> ConfigResult<NiihauConfig> {
        let mut builder = Config::builder();

        // Add default configuration values
        builder = builder.add_source(
            Config::try_from(&NiihauConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };

            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(map_external_error)?;

        let niihau_config: NiihauConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        niihau_config.validate()?;

        Ok(niihau_config)
    }

    /// Writes the default configuration to `path` as TOML.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file; parent directories must exist
    ///
    /// # Returns
    ///
    /// * `Err(NiihauError::Io)` if the file cannot be written
    /// * `Err(NiihauError::Config)` if the defaults cannot be rendered
    pub fn write_default<P: AsRef<Path>>(path: P) -> NiihauResult<()> {
        let rendered = toml::to_string_pretty(&NiihauConfig::default())
            .map_err(|e| ConfigError::Other(e.to_string()))?;

        std::fs::write(path, rendered)?;
        Ok(())
    }
}

fn map_external_error(error: ExternalConfigError) -> ConfigError {
    match error {
        ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
        ExternalConfigError::PathParse(kind) => {
            ConfigError::ParseError(format!("Invalid path: {kind:?}"))
        }
        ExternalConfigError::FileParse { uri, cause } => ConfigError::ParseError(format!(
            "{}: {cause}",
            uri.as_deref().unwrap_or("<unknown>")
        )),
        ExternalConfigError::Foreign(err) => ConfigError::Other(err.to_string()),
        ExternalConfigError::Frozen => {
            ConfigError::ParseError("Configuration is frozen".to_string())
        }
        ExternalConfigError::Message(msg) => ConfigError::ParseError(msg),
        ExternalConfigError::Type { key, .. } => ConfigError::ParseError(format!(
            "Type conversion error for {}",
            key.as_deref().unwrap_or("<root>")
        )),
    }
}

/// Global configuration accessor.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    config: Arc<NiihauConfig>,
}

impl GlobalConfig {
    /// Creates a new global configuration.
    pub fn new(config: NiihauConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration.
    pub fn get(&self) -> &NiihauConfig {
        &self.config
    }
}

static GLOBAL_CONFIG: OnceCell<GlobalConfig> = OnceCell::new();

/// Initialize the global configuration.
///
/// Only the first call takes effect; later calls log a warning and are ignored.
///
/// # Arguments
///
/// * `config` - The configuration to set as global
pub fn init_global_config(config: NiihauConfig) {
    if GLOBAL_CONFIG.set(GlobalConfig::new(config)).is_err() {
        tracing::warn!("Global configuration was already initialized, ignoring new configuration");
    }
}

/// Get the global configuration, if it has been initialized.
pub fn get_global_config() -> Option<GlobalConfig> {
    GLOBAL_CONFIG.get().cloned()
}
