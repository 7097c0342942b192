//! Error types for lidar-augment crate.

use lidar_types::{ErrorKind, FrameId, LidarError};
use thiserror::Error;

/// Errors that can occur while augmenting frames.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AugmentError {
    /// Step must be finite and strictly positive.
    #[error("invalid step: {0} (must be > 0)")]
    InvalidStep(f64),

    /// The frame store is not positioned on any frame.
    #[error("no active frame")]
    NoActiveFrame,

    /// The frame was never augmented, so there is nothing to restore.
    #[error("no snapshot for frame {0}")]
    NoSnapshot(FrameId),

    /// The frame store rejected an operation.
    #[error(transparent)]
    Store(#[from] LidarError),
}

impl AugmentError {
    /// Returns the broad classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidStep(_) | Self::NoSnapshot(_) => ErrorKind::InvalidInput,
            Self::NoActiveFrame => ErrorKind::Blocked,
            Self::Store(err) => err.kind(),
        }
    }
}

/// Result type for augmentation operations.
pub type Result<T> = std::result::Result<T, AugmentError>;
