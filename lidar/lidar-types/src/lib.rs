//! Frame data types for `LiDAR` frame inspection.
//!
//! This crate provides the shared vocabulary of the inspection stack:
//!
//! # Frames
//!
//! - [`LidarFrame`] - One recorded sweep of polar samples
//! - [`PolarSample`] - `(angle, range)` reading
//! - [`AngleUnit`], [`LengthUnit`] - Units carried per frame
//!
//! # Partitions and Views
//!
//! - [`PartitionLabel`] - Train / validation / test assignment
//! - [`View`] - The sequence being browsed (all frames or one partition)
//! - [`parse_label`] - Case-insensitive label normalization
//!
//! # Storage
//!
//! - [`FrameStore`] - Ordered storage with a single read pointer
//! - [`InMemoryFrameStore`] - Vector-backed reference implementation
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero GUI dependencies**. It can be used in
//! CLI tools, batch converters and desktop front ends alike.
//!
//! # Example
//!
//! ```
//! use lidar_types::{FrameStore, InMemoryFrameStore, LidarFrame, PolarSample, View};
//!
//! let frames = vec![
//!     LidarFrame::new(0, vec![PolarSample::new(0.0, 1.0)]),
//!     LidarFrame::new(1, vec![PolarSample::new(0.0, 2.0)]),
//! ];
//! let store = InMemoryFrameStore::new(frames).unwrap();
//! assert_eq!(store.len(), 2);
//!
//! let view: View = "Train".parse().unwrap();
//! assert!(view.is_partition());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod frame;
mod label;
mod store;

pub use error::{ErrorKind, LidarError, Result};
pub use frame::{AngleUnit, FrameId, LengthUnit, LidarFrame, PolarSample};
pub use label::{Heading, NavDirection, PartitionLabel, View, parse_label};
pub use store::{FrameStore, InMemoryFrameStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        AngleUnit, FrameId, FrameStore, Heading, InMemoryFrameStore, LengthUnit, LidarError,
        LidarFrame, NavDirection, PartitionLabel, PolarSample, View, parse_label,
    };
}
