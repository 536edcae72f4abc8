//! Chat configuration.
//!
//! Read from `~/.config/upscall/chat.toml`. Every section is optional and the
//! defaults reproduce the widget's stock pacing.

use crate::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for chat.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub logging: LoggingConfig,
    pub typing: TypingConfig,
    pub follow_up: FollowUpConfig,
}

/// Log filter applied when `RUST_LOG` is not set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Simulated typing latency before each reply.
///
/// The delay is `base_ms + uniform(0, jitter_ms) + min(per_char_ms * len, max_length_ms)`
/// where `len` is the length of the user's message in characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub base_ms: u64,
    pub jitter_ms: u64,
    pub per_char_ms: u64,
    pub max_length_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            base_ms: 600,
            jitter_ms: 1000,
            per_char_ms: 10,
            max_length_ms: 500,
        }
    }
}

/// The one-off "biggest marketing challenge" prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowUpConfig {
    pub enabled: bool,
    /// Message count on which the follow-up may be scheduled.
    pub turn: u32,
    /// Gap between the primary reply and the follow-up's typing indicator.
    pub delay_ms: u64,
    /// How long the typing indicator shows before the follow-up text.
    pub typing_ms: u64,
}

impl Default for FollowUpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            turn: 3,
            delay_ms: 1500,
            typing_ms: 800,
        }
    }
}

impl ChatConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ChatConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChatError::io(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` (or the default location) and falls back to defaults when
    /// the file does not exist. A file that exists but is invalid is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("No default config location ({}), using defaults", e);
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            tracing::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        tracing::info!("Loading chat config from {:?}", path);
        Self::load(&path)
    }

    /// Returns the path to the configuration file: ~/.config/upscall/chat.toml
    pub fn default_path() -> Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| ChatError::config("Could not determine home directory"))?;
        Ok(home.join(".config").join("upscall").join("chat.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ChatError::config("logging.level must not be empty"));
        }
        if self.follow_up.turn == 0 {
            return Err(ChatError::config("follow_up.turn must be at least 1"));
        }
        Ok(())
    }
}
