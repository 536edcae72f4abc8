//! Error types for the Upscall chat engine.
//!
//! Conversation operations never fail; malformed input is ignored instead.
//! These errors cover the ambient surface: loading configuration, exporting
//! transcripts and installing the log subscriber.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the chat crates.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ChatError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ChatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ChatError>`.
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: ChatError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_toml_conversion_is_serialization() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("[typing");
        let err: ChatError = parse.unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: TOML"));
    }
}
