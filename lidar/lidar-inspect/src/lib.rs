//! Command surface for browsing and augmenting partitioned LiDAR frames.
//!
//! This crate ties [`lidar_nav`] and [`lidar_augment`] to one frame store
//! and exposes them as parsed commands:
//!
//! - [`Session`] - Store, navigator and augmentation engine behind one API
//! - [`Command`] / [`Outcome`] - User intents and their results
//! - [`SessionStatus`] - Side-effect-free snapshot for periodic refreshes
//! - [`InspectConfig`] - TOML configuration (move defaults, log filter, split)
//! - [`load_frames`] / [`load_labels`] / [`save_frames`] - JSON dataset files
//!
//! The `lidar-inspect` binary drives a [`Session`] from a script or stdin.
//!
//! # Example
//!
//! ```
//! use lidar_inspect::{InspectConfig, Outcome, Session, labels_from_str};
//! use lidar_types::{InMemoryFrameStore, LidarFrame, PolarSample, View};
//!
//! let frames = (0..6)
//!     .map(|id| LidarFrame::new(id, vec![PolarSample::new(0.0, 1.0)]))
//!     .collect();
//! let store = InMemoryFrameStore::new(frames).unwrap();
//! let labels = labels_from_str(r#"{"1": "train", "4": "TRAIN"}"#).unwrap();
//! let mut session = Session::new(store, &labels, &InspectConfig::default()).unwrap();
//!
//! assert_eq!(session.execute_line("view train"), Outcome::Applied);
//! assert_eq!(session.execute_line("move e 10 mm"), Outcome::Applied);
//! let status = session.status();
//! assert_eq!(status.view, View::Train);
//! assert_eq!(status.frame, Some(1));
//! assert!(status.modified);
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

mod config;
mod dataset;
mod error;
mod session;

pub use config::{InspectConfig, SplitConfig};
pub use dataset::{frames_from_reader, labels_from_str, load_frames, load_labels, save_frames};
pub use error::{InspectError, Result};
pub use session::{Command, Outcome, Session, SessionStatus};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        Command, InspectConfig, InspectError, Outcome, Session, SessionStatus, SplitConfig,
        load_frames, load_labels, save_frames,
    };
}
