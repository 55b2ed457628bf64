//! Configuration management for the tafsir translator.
//!
//! Handles loading, saving, and validating configuration from
//! platform-specific config directories.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application name used for the config directory.
const APP_NAME: &str = "Tafsir";

/// Default config filename.
const CONFIG_FILENAME: &str = "config.toml";

/// Default endpoint for the Google Translate provider.
pub const DEFAULT_PROVIDER_ENDPOINT: &str =
    "https://translate.googleapis.com/translate_a/single";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Translation behavior settings.
    pub translation: TranslationConfig,

    /// Translation provider settings.
    pub provider: ProviderConfig,

    /// File paths.
    pub paths: PathsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translation: TranslationConfig::default(),
            provider: ProviderConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

/// How translated chunks are joined back together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinMode {
    /// Join chunks with single spaces into flowing text.
    #[default]
    Flow,
    /// Join chunks with blank lines, one paragraph per chunk.
    Paragraphs,
}

/// Translation behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Default target language code (ISO 639-1).
    pub target_lang: String,

    /// Maximum characters per translation chunk.
    pub max_chunk_chars: usize,

    /// Number of attempts for each chunk, including the first.
    pub retries: u32,

    /// Delay between provider requests in seconds. Also the base for
    /// retry backoff.
    pub delay_between_requests_sec: f64,

    /// How translated chunks are joined.
    pub join_mode: JoinMode,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            target_lang: "en".to_string(),
            max_chunk_chars: 3500,
            retries: 3,
            delay_between_requests_sec: 3.0,
            join_mode: JoinMode::Flow,
        }
    }
}

/// Translation provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Endpoint URL for the translation provider.
    pub endpoint: String,

    /// Request timeout in seconds.
    pub timeout_sec: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PROVIDER_ENDPOINT.to_string(),
            timeout_sec: 30,
        }
    }
}

/// File path configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding per-author tafsir JSON files.
    pub data_directory: PathBuf,

    /// Directory for cached translations. Defaults to a `cache`
    /// subdirectory of the config directory.
    pub cache_directory: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            cache_directory: None,
        }
    }
}

impl Config {
    /// Returns the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Loads configuration from the default location.
    ///
    /// If the config file doesn't exist, creates a default one.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.translation.target_lang.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "translation.target_lang".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.translation.max_chunk_chars == 0 {
            return Err(ConfigError::InvalidValue {
                key: "translation.max_chunk_chars".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        if self.translation.retries == 0 {
            return Err(ConfigError::InvalidValue {
                key: "translation.retries".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        let delay = self.translation.delay_between_requests_sec;
        if !delay.is_finite() || delay < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "translation.delay_between_requests_sec".to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }

        if self.provider.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "provider.endpoint".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        if self.provider.timeout_sec == 0 {
            return Err(ConfigError::InvalidValue {
                key: "provider.timeout_sec".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the effective cache directory, using config or default.
    pub fn cache_dir(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref dir) = self.paths.cache_directory {
            Ok(dir.clone())
        } else {
            Ok(Self::config_dir()?.join("cache"))
        }
    }
}
