//! Error types for LiDAR frame data.

use thiserror::Error;

use crate::FrameId;

/// Broad classification shared by every error in the inspection stack.
///
/// UI layers map these to control state and status text: `Blocked` only
/// toggles controls, `InvalidInput` is shown to the operator, `NotFound` and
/// `InternalInconsistency` are repaired in place and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A boundary was reached; expected during normal browsing.
    Blocked,
    /// A frame id went stale after an external mutation.
    NotFound,
    /// Caller supplied a value that was rejected before any mutation.
    InvalidInput,
    /// Derived state disagreed with its source and had to be repaired.
    InternalInconsistency,
}

/// Errors that can occur when working with frames and frame stores.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LidarError {
    /// No frame with this id exists in the store.
    #[error("frame not found: {0}")]
    NotFound(FrameId),

    /// Two frames were loaded with the same id.
    #[error("duplicate frame id: {0}")]
    DuplicateFrame(FrameId),

    /// A partition label string could not be recognised.
    #[error("unknown partition label: {0:?}")]
    UnknownLabel(String),

    /// A view selector string could not be recognised.
    #[error("unknown view: {0:?}")]
    UnknownView(String),

    /// A length unit string could not be recognised.
    #[error("unknown unit: {0:?} (expected m or mm)")]
    UnknownUnit(String),

    /// A heading string could not be recognised.
    #[error("unknown heading: {0:?} (expected N, S, E or W)")]
    UnknownHeading(String),

    /// Replacement samples do not match the frame's sample count.
    #[error("sample count mismatch: expected {expected}, got {actual}")]
    SampleCountMismatch {
        /// Number of samples in the stored frame.
        expected: usize,
        /// Number of samples supplied.
        actual: usize,
    },
}

impl LidarError {
    /// Creates a sample count mismatch error.
    #[must_use]
    pub const fn sample_mismatch(expected: usize, actual: usize) -> Self {
        Self::SampleCountMismatch { expected, actual }
    }

    /// Creates an unknown label error.
    #[must_use]
    pub fn unknown_label(raw: impl Into<String>) -> Self {
        Self::UnknownLabel(raw.into())
    }

    /// Creates an unknown view error.
    #[must_use]
    pub fn unknown_view(raw: impl Into<String>) -> Self {
        Self::UnknownView(raw.into())
    }

    /// Creates an unknown unit error.
    #[must_use]
    pub fn unknown_unit(raw: impl Into<String>) -> Self {
        Self::UnknownUnit(raw.into())
    }

    /// Creates an unknown heading error.
    #[must_use]
    pub fn unknown_heading(raw: impl Into<String>) -> Self {
        Self::UnknownHeading(raw.into())
    }

    /// Returns the broad classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateFrame(_) | Self::SampleCountMismatch { .. } => {
                ErrorKind::InternalInconsistency
            }
            Self::UnknownLabel(_)
            | Self::UnknownView(_)
            | Self::UnknownUnit(_)
            | Self::UnknownHeading(_) => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for frame operations.
pub type Result<T> = std::result::Result<T, LidarError>;
