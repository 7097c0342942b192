//! Partition-aware frame navigation.
//!
//! This crate browses a recorded frame sequence either as a whole or one
//! partition at a time:
//!
//! # Partitions
//!
//! - [`PartitionIndex`] - Ordered frame ids per partition label
//! - [`LabelMap`] - Frame id to optional label mapping
//! - [`split_frames`] - Seeded train/validation/test assignment
//!
//! # Navigation
//!
//! - [`NavigationController`] - One pointer per view, store resynchronization
//! - [`NavButtons`] - Prev/next enable state for a UI layer
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero GUI dependencies**. A UI layer reads
//! [`NavigationController::buttons`] and the store's current frame, and sends
//! view switches and steps back through the controller.
//!
//! # Example
//!
//! ```
//! use lidar_nav::{NavigationController, SplitRatios, split_frames};
//! use lidar_types::{FrameStore, InMemoryFrameStore, LidarFrame, NavDirection, View};
//!
//! let frames = (0..20).map(|id| LidarFrame::new(id, Vec::new())).collect();
//! let mut store = InMemoryFrameStore::new(frames).unwrap();
//! let labels = split_frames(&store.ids(), SplitRatios::default(), Some(42)).unwrap();
//!
//! let mut nav = NavigationController::load(&mut store, &labels).unwrap();
//! nav.switch_view(&mut store, View::Validation).unwrap();
//! assert!(!nav.can_go_prev());
//! assert!(nav.advance(&mut store, NavDirection::Next).unwrap());
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

mod controller;
mod error;
mod partition;
mod split;

pub use controller::{ButtonPath, NavButtons, NavigationController};
pub use error::{NavError, Result};
pub use partition::{LabelMap, PartitionIndex, PartitionSummary};
pub use split::{SplitRatios, split_frames};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        ButtonPath, LabelMap, NavButtons, NavError, NavigationController, PartitionIndex,
        PartitionSummary, SplitRatios, split_frames,
    };
}
