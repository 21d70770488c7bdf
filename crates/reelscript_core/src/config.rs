//! Layered configuration.

use crate::FieldOptions;
use config::{Config, Environment, File, FileFormat};
use reelscript_error::{ConfigError, ReelscriptError, ReelscriptResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Model endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier, e.g. `gemini-2.0-flash`
    name: String,
    /// API base URL
    base_url: String,
    /// Sampling temperature
    temperature: f32,
    /// Response token cap
    max_output_tokens: u32,
    /// HTTP request timeout in seconds
    timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            temperature: 0.9,
            max_output_tokens: 4096,
            timeout_secs: 60,
        }
    }
}

impl ModelConfig {
    /// Copy of this config with another model name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Copy of this config pointed at another base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on
    bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Complete Reelscript configuration.
///
/// # Examples
///
/// ```
/// use reelscript_core::ReelscriptConfig;
///
/// let config = ReelscriptConfig::default();
/// assert_eq!(config.model().name(), "gemini-2.0-flash");
/// assert_eq!(config.server().bind(), "127.0.0.1:8080");
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters,
)]
#[serde(default)]
pub struct ReelscriptConfig {
    /// Model endpoint settings
    model: ModelConfig,
    /// Allowed form values
    options: FieldOptions,
    /// HTTP server settings
    server: ServerConfig,
}

impl ReelscriptConfig {
    /// Load configuration from a specific file path, on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ReelscriptResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ReelscriptError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ReelscriptError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: environment > user files > bundled default.
    ///
    /// Sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (reelscript.toml shipped with the library)
    /// 2. User config in home directory (~/.config/reelscript/reelscript.toml)
    /// 3. User config in current directory (./reelscript.toml)
    /// 4. `REELSCRIPT_` environment variables, `__` between sections
    ///    (e.g. `REELSCRIPT_MODEL__NAME`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use reelscript_core::ReelscriptConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ReelscriptConfig::load()?;
    /// println!("{}", config.model().name());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> ReelscriptResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/reelscript/reelscript.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("reelscript").required(false))
            .add_source(Environment::with_prefix("REELSCRIPT").separator("__"));

        builder
            .build()
            .map_err(|e| {
                ReelscriptError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ReelscriptError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../reelscript.toml");
