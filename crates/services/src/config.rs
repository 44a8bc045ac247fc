use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use play_core::rules::{MemoryRules, QuizRules, WordRules};
use play_core::TimeLimit;

use crate::error::ConfigError;

/// Per-game settings for the host.
///
/// Every field has a default, so a config file only lists what it changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    pub quiz: QuizConfig,
    pub memory: MemoryConfig,
    pub words: WordsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub rules: QuizRules,
    /// Overrides the quiz's own duration when set.
    pub minutes: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub rules: MemoryRules,
    pub limit: TimeLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig {
    pub rules: WordRules,
    pub seconds: u32,
    /// How many target words the hint reveals.
    pub hints: usize,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            rules: WordRules::default(),
            seconds: 180,
            hints: 3,
        }
    }
}

impl WordsConfig {
    #[must_use]
    pub fn time_limit(&self) -> TimeLimit {
        TimeLimit::seconds(self.seconds)
    }
}

impl PlayConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed JSON and `ConfigError::Rules`
    /// for out-of-range rule values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()
    }

    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise see
    /// [`PlayConfig::from_json`].
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_json(&raw)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `path` when given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// See [`PlayConfig::load`].
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path).await,
            None => Ok(Self::default()),
        }
    }

    /// Re-check rule values that arrived through deserialization.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Rules` for the first invalid rule set.
    pub fn validate(self) -> Result<Self, ConfigError> {
        Ok(Self {
            quiz: self.quiz,
            memory: MemoryConfig {
                rules: self.memory.rules.validate()?,
                limit: self.memory.limit,
            },
            words: WordsConfig {
                rules: self.words.rules.validate()?,
                ..self.words
            },
        })
    }
}
