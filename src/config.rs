use config::{Config, ConfigError, Environment, File, Source};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from script-explainer.toml or environment variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `text` or `json`
    pub format: String,
    /// Print only type, verdict and summary
    pub quiet: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                format: "text".to_string(),
                quiet: false,
            },
            logging: LoggingConfig {
                level: "error".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from script-explainer.toml and environment variables
    ///
    /// Environment variables take precedence over file configuration, e.g.
    /// `SCRIPT_EXPLAINER__OUTPUT__FORMAT=json`. The file is optional.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(File::with_name("script-explainer").required(false))
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::build(File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        let config = Config::builder()
            .set_default("output.format", defaults.output.format)?
            .set_default("output.quiet", defaults.output.quiet)?
            .set_default("logging.level", defaults.logging.level)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("SCRIPT_EXPLAINER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
