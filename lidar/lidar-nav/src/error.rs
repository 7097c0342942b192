//! Error types for lidar-nav crate.

use lidar_types::{ErrorKind, LidarError, View};
use thiserror::Error;

/// Errors that can occur in navigation operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    /// There are no frames at all, so no view can be browsed.
    #[error("no active sequence: {view} view has no frames")]
    NoActiveSequence {
        /// The view that was active.
        view: View,
    },

    /// A label mapping was empty where partitions were expected.
    #[error("label mapping is empty")]
    EmptyInput,

    /// Invalid split ratios.
    #[error("invalid split ratios: {0}")]
    InvalidSplit(String),

    /// The frame store rejected an operation.
    #[error(transparent)]
    Store(#[from] LidarError),
}

impl NavError {
    /// Creates a no active sequence error.
    #[must_use]
    pub const fn no_active_sequence(view: View) -> Self {
        Self::NoActiveSequence { view }
    }

    /// Creates an invalid split error.
    #[must_use]
    pub fn invalid_split(reason: impl Into<String>) -> Self {
        Self::InvalidSplit(reason.into())
    }

    /// Returns the broad classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoActiveSequence { .. } => ErrorKind::Blocked,
            Self::EmptyInput | Self::InvalidSplit(_) => ErrorKind::InvalidInput,
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for navigation operations.
pub type Result<T> = std::result::Result<T, NavError>;
