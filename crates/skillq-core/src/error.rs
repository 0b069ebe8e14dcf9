//! Error types for the SkillQ directory client.

use thiserror::Error;

/// A shared error type for the directory client.
///
/// The first three variants are the failure taxonomy of the client's own
/// operations; the rest cover ambient concerns such as configuration loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkillqError {
    /// A query (`list_all`, `filter_by_skill`) failed.
    #[error("Read failed ({operation}): {message}")]
    ReadFailed {
        operation: &'static str,
        message: String,
    },

    /// A mutation (`create`, `delete`) failed.
    #[error("Write failed ({operation}): {message}")]
    WriteFailed {
        operation: &'static str,
        message: String,
    },

    /// The selected image could not be turned into a payload.
    #[error("Image encoding failed for '{path}': {message}")]
    EncodeFailed { path: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SkillqError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a ReadFailed error
    pub fn read_failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::ReadFailed {
            operation,
            message: message.into(),
        }
    }

    /// Creates a WriteFailed error
    pub fn write_failed(operation: &'static str, message: impl Into<String>) -> Self {
        Self::WriteFailed {
            operation,
            message: message.into(),
        }
    }

    /// Creates an EncodeFailed error
    pub fn encode_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EncodeFailed {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_read_failed(&self) -> bool {
        matches!(self, Self::ReadFailed { .. })
    }

    pub fn is_write_failed(&self) -> bool {
        matches!(self, Self::WriteFailed { .. })
    }

    pub fn is_encode_failed(&self) -> bool {
        matches!(self, Self::EncodeFailed { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SkillqError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SkillqError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SkillqError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SkillqError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SkillqError>`.
pub type Result<T> = std::result::Result<T, SkillqError>;
