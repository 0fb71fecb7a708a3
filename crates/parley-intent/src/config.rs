//! Configuration for matching, generation, and strategy selection.

use parley_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::DEFAULT_CONFIDENCE_THRESHOLD;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "PARLEY_CONFIG";

/// Complete assistant configuration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    /// Pattern matching settings
    pub matching: MatchingConfig,
    /// External generation settings
    pub generation: GenerationConfig,
    /// Which optional strategies are registered
    pub strategies: StrategyConfig,
}

/// Pattern matching configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum similarity for a non-fallback match (0.0-1.0)
    pub threshold: f64,
    /// Intents catalog JSON; built-in catalog when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Vocabulary artifact JSON; built-in vocabulary when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocabulary_path: Option<PathBuf>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            catalog_path: None,
            vocabulary_path: None,
        }
    }
}

/// Local model server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Whether replies are generated by the local model first
    pub enabled: bool,
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Model used for replies and intent classification
    pub model: String,
    /// Timeout in seconds for model requests
    pub timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:11434".to_owned(),
            model: "llama3".to_owned(),
            timeout_seconds: 30,
        }
    }
}

/// Optional strategy toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Divert pasted source code to the code analysis strategy
    pub code_analysis: bool,
    /// Register the bag-of-words classifier strategy
    pub classifier: bool,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            code_analysis: true,
            classifier: false,
        }
    }
}

impl ParleyConfig {
    /// Get the default config directory path (`~/.parley`)
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_dir() -> Result<PathBuf> {
        use dirs::home_dir;
        let home = home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_owned()))?;
        Ok(home.join(".parley"))
    }

    /// Get the config file path, honouring `PARLEY_CONFIG`
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR)
            && !path.trim().is_empty()
        {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load config from the default location.
    /// If the config doesn't exist, creates it with default values
    ///
    /// # Errors
    /// Returns an error if the config cannot be read or created
    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            let config = Self::default();
            config.save_to_file(&config_path)?;
            tracing::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|error| Error::Config(format!("Failed to read config: {error}")))?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|error| {
                Error::Config(format!("Failed to create config directory: {error}"))
            })?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|error| Error::Config(format!("Failed to serialize config: {error}")))?;

        let header = "# Parley Configuration File\n\
                      # This file is automatically generated on first run\n\
                      # Edit this file to customize your settings\n\n";

        fs::write(path, format!("{header}{contents}"))
            .map_err(|error| Error::Config(format!("Failed to write config: {error}")))?;

        Ok(())
    }

    /// Check value ranges.
    ///
    /// # Errors
    /// Returns an error if the threshold is outside `[0, 1]` or the timeout is zero
    pub fn validate(&self) -> Result<()> {
        let threshold = self.matching.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::Config(format!(
                "matching.threshold must be within [0, 1], got {threshold}"
            )));
        }
        if self.generation.timeout_seconds == 0 {
            return Err(Error::Config(
                "generation.timeout_seconds must be positive".to_owned(),
            ));
        }
        Ok(())
    }
}
