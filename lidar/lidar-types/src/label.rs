//! Partition labels, views and movement directions.
//!
//! Every string-to-label conversion goes through this module. Selectors and
//! stored labels are trimmed and matched case-insensitively, then kept only in
//! their canonical enum form, so `"TRAIN"` from a view selector and `"train"`
//! from a split file resolve to the same partition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LidarError;

/// Named subset a frame can be assigned to.
///
/// A frame with no label belongs only to the unpartitioned sequence; that
/// case is `Option::<PartitionLabel>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PartitionLabel {
    /// Training subset.
    Train,
    /// Validation subset.
    Validation,
    /// Test subset.
    Test,
}

impl PartitionLabel {
    /// All labels in canonical order.
    pub const ALL: [Self; 3] = [Self::Train, Self::Validation, Self::Test];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Validation => "validation",
            Self::Test => "test",
        }
    }

    /// Dense index in `0..3`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Train => 0,
            Self::Validation => 1,
            Self::Test => 2,
        }
    }
}

/// Parses an optional label.
///
/// `none`, `unassigned` and the empty string mean "no partition".
///
/// # Errors
///
/// Returns [`LidarError::UnknownLabel`] for anything else that is not a label.
///
/// # Example
///
/// ```
/// use lidar_types::{PartitionLabel, parse_label};
///
/// assert_eq!(parse_label("TRAIN").unwrap(), Some(PartitionLabel::Train));
/// assert_eq!(parse_label(" none ").unwrap(), None);
/// assert!(parse_label("holdout").is_err());
/// ```
pub fn parse_label(raw: &str) -> Result<Option<PartitionLabel>, LidarError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "none" | "unassigned" => Ok(None),
        "train" | "training" => Ok(Some(PartitionLabel::Train)),
        "val" | "valid" | "validation" => Ok(Some(PartitionLabel::Validation)),
        "test" | "testing" => Ok(Some(PartitionLabel::Test)),
        _ => Err(LidarError::unknown_label(raw)),
    }
}

impl FromStr for PartitionLabel {
    type Err = LidarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label(s)?.ok_or_else(|| LidarError::unknown_label(s))
    }
}

impl TryFrom<String> for PartitionLabel {
    type Error = LidarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PartitionLabel> for String {
    fn from(label: PartitionLabel) -> Self {
        label.as_str().to_string()
    }
}

impl fmt::Display for PartitionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sequence currently being browsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    /// All frames, ascending by id.
    #[default]
    Original,
    /// Frames labelled [`PartitionLabel::Train`].
    Train,
    /// Frames labelled [`PartitionLabel::Validation`].
    Validation,
    /// Frames labelled [`PartitionLabel::Test`].
    Test,
}

impl View {
    /// Every view, `Original` first.
    pub const ALL: [Self; 4] = [Self::Original, Self::Train, Self::Validation, Self::Test];

    /// The partition this view browses, or `None` for `Original`.
    #[must_use]
    pub const fn label(self) -> Option<PartitionLabel> {
        match self {
            Self::Original => None,
            Self::Train => Some(PartitionLabel::Train),
            Self::Validation => Some(PartitionLabel::Validation),
            Self::Test => Some(PartitionLabel::Test),
        }
    }

    /// Whether this view browses a partition.
    #[must_use]
    pub const fn is_partition(self) -> bool {
        !matches!(self, Self::Original)
    }

    /// Dense index in `0..4`, used for per-view pointer slots.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Original => 0,
            Self::Train => 1,
            Self::Validation => 2,
            Self::Test => 3,
        }
    }
}

impl From<PartitionLabel> for View {
    fn from(label: PartitionLabel) -> Self {
        match label {
            PartitionLabel::Train => Self::Train,
            PartitionLabel::Validation => Self::Validation,
            PartitionLabel::Test => Self::Test,
        }
    }
}

impl From<Option<PartitionLabel>> for View {
    fn from(label: Option<PartitionLabel>) -> Self {
        label.map_or(Self::Original, Self::from)
    }
}

impl FromStr for View {
    type Err = LidarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "original" | "all" => Ok(Self::Original),
            other => match parse_label(other) {
                Ok(Some(label)) => Ok(label.into()),
                _ => Err(LidarError::unknown_view(s)),
            },
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => label.fmt(f),
            None => f.write_str("original"),
        }
    }
}

/// Step direction within a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    /// Towards the start of the sequence.
    Prev,
    /// Towards the end of the sequence.
    Next,
}

/// Compass direction for moving the sensor origin.
///
/// North is `+y`, East is `+x` in the sensor plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    /// `+y`.
    North,
    /// `-y`.
    South,
    /// `+x`.
    East,
    /// `-x`.
    West,
}

impl Heading {
    /// Unit vector `[x, y]` of this heading.
    #[must_use]
    pub const fn unit_vector(self) -> [f64; 2] {
        match self {
            Self::North => [0.0, 1.0],
            Self::South => [0.0, -1.0],
            Self::East => [1.0, 0.0],
            Self::West => [-1.0, 0.0],
        }
    }

    /// The opposite heading.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }
}

impl FromStr for Heading {
    type Err = LidarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Self::North),
            "s" | "south" => Ok(Self::South),
            "e" | "east" => Ok(Self::East),
            "w" | "west" => Ok(Self::West),
            _ => Err(LidarError::unknown_heading(s)),
        }
    }
}
