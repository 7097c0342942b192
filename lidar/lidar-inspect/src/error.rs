//! Error types for lidar-inspect crate.

use lidar_augment::AugmentError;
use lidar_nav::NavError;
use lidar_types::{ErrorKind, LidarError};
use thiserror::Error;

/// Errors that can occur in the inspection session and its inputs.
#[derive(Debug, Error)]
pub enum InspectError {
    /// A command line could not be parsed.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration could not be read or parsed.
    #[error("invalid config: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Frame data error.
    #[error(transparent)]
    Frame(#[from] LidarError),

    /// Navigation error.
    #[error(transparent)]
    Nav(#[from] NavError),

    /// Augmentation error.
    #[error(transparent)]
    Augment(#[from] AugmentError),
}

impl InspectError {
    /// Creates an invalid command error.
    #[must_use]
    pub fn invalid_command(reason: impl Into<String>) -> Self {
        Self::InvalidCommand(reason.into())
    }

    /// Creates a config error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    /// Returns the broad classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCommand(_) | Self::Config(_) | Self::Io(_) | Self::Serialization(_) => {
                ErrorKind::InvalidInput
            }
            Self::Frame(err) => err.kind(),
            Self::Nav(err) => err.kind(),
            Self::Augment(err) => err.kind(),
        }
    }
}

impl From<std::io::Error> for InspectError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InspectError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for InspectError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for inspection operations.
pub type Result<T> = std::result::Result<T, InspectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_command() {
        let err = InspectError::invalid_command("jump");
        assert!(err.to_string().contains("jump"));
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: InspectError = io_err.into();
        assert!(matches!(err, InspectError::Io(_)));
    }

    #[test]
    fn error_from_serde_error() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: InspectError = json_err.into();
        assert!(matches!(err, InspectError::Serialization(_)));
    }

    #[test]
    fn error_kind_passes_through() {
        let err: InspectError = AugmentError::InvalidStep(0.0).into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err: InspectError = LidarError::NotFound(1).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
