//! Reversible augmentation of `LiDAR` frames.
//!
//! This crate moves the sensor origin of the currently shown frame and keeps
//! enough state to undo it:
//!
//! - [`AugmentationEngine`] - Applies moves, tracks modified frames, reverts
//! - [`MoveRequest`] - Heading, step and unit of one move
//! - [`translate_samples`] - Polar → Cartesian → shifted → polar
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero GUI dependencies**. The engine only
//! rewrites the content of the store's current frame; it never moves the
//! store's read pointer.
//!
//! # Example
//!
//! ```
//! use lidar_augment::{AugmentationEngine, MoveRequest};
//! use lidar_types::{FrameStore, Heading, InMemoryFrameStore, LengthUnit, LidarFrame, PolarSample};
//!
//! let frame = LidarFrame::new(0, vec![PolarSample::new(0.3, 4.0)]);
//! let mut store = InMemoryFrameStore::new(vec![frame.clone()]).unwrap();
//! let mut engine = AugmentationEngine::new();
//!
//! let step = |heading| MoveRequest::new(heading, 20.0, LengthUnit::Millimeters);
//! engine.move_origin(&mut store, &step(Heading::North)).unwrap();
//! engine.move_origin(&mut store, &step(Heading::South)).unwrap();
//!
//! let sample = store.current().unwrap().samples[0];
//! assert!((sample.angle - 0.3).abs() < 1e-9);
//! assert!((sample.range - 4.0).abs() < 1e-9);
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod engine;
mod error;
mod polar;

pub use engine::{AugmentationEngine, ModificationRecord, MoveRequest};
pub use error::{AugmentError, Result};
pub use polar::translate_samples;

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        AugmentError, AugmentationEngine, ModificationRecord, MoveRequest, translate_samples,
    };
}
