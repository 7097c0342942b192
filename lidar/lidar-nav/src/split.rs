//! Train/validation/test label assignment.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use lidar_types::{FrameId, PartitionLabel};

use crate::error::{NavError, Result};
use crate::partition::LabelMap;

/// Proportions of frames assigned to each partition.
///
/// Whatever the three ratios leave over stays unassigned.
///
/// # Example
///
/// ```
/// use lidar_nav::SplitRatios;
///
/// let ratios = SplitRatios::new(0.7, 0.2, 0.1).unwrap();
/// assert!(ratios.unassigned_ratio().abs() < 1e-9);
/// assert!(SplitRatios::new(0.8, 0.3, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRatios {
    /// Proportion labelled train.
    pub train: f64,
    /// Proportion labelled validation.
    pub validation: f64,
    /// Proportion labelled test.
    pub test: f64,
}

impl SplitRatios {
    /// Common 70/20/10 split.
    pub const SEVENTY_TWENTY_TEN: Self = Self {
        train: 0.7,
        validation: 0.2,
        test: 0.1,
    };

    /// Common 80/10/10 split.
    pub const EIGHTY_TEN_TEN: Self = Self {
        train: 0.8,
        validation: 0.1,
        test: 0.1,
    };

    /// Creates validated ratios.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidSplit`] if any ratio is outside `[0, 1]`
    /// or the ratios sum to more than 1.
    pub fn new(train: f64, validation: f64, test: f64) -> Result<Self> {
        let ratios = Self {
            train,
            validation,
            test,
        };
        ratios.validate()?;
        Ok(ratios)
    }

    /// Checks the ratios.
    ///
    /// # Errors
    ///
    /// See [`SplitRatios::new`].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("train", self.train),
            ("validation", self.validation),
            ("test", self.test),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(NavError::invalid_split(format!(
                    "{name} ratio {value} not in [0, 1]"
                )));
            }
        }
        let sum = self.train + self.validation + self.test;
        if sum > 1.0 + 1e-9 {
            return Err(NavError::invalid_split(format!("ratios sum to {sum}")));
        }
        Ok(())
    }

    /// Share of frames left without a label.
    #[must_use]
    pub fn unassigned_ratio(&self) -> f64 {
        (1.0 - self.train - self.validation - self.test).max(0.0)
    }
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self::SEVENTY_TWENTY_TEN
    }
}

/// Assigns partition labels to `ids`.
///
/// Ids are shuffled with a seeded `ChaCha8` generator (entropy when `seed` is
/// `None`), then cut into consecutive train, validation and test runs.
///
/// # Errors
///
/// Returns [`NavError::InvalidSplit`] for invalid ratios.
///
/// # Example
///
/// ```
/// use lidar_nav::{SplitRatios, split_frames};
///
/// let ids: Vec<u64> = (0..10).collect();
/// let labels = split_frames(&ids, SplitRatios::SEVENTY_TWENTY_TEN, Some(42)).unwrap();
///
/// assert_eq!(labels.len(), 10);
/// assert_eq!(labels.values().filter(|l| l.is_some()).count(), 10);
/// ```
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn split_frames(ids: &[FrameId], ratios: SplitRatios, seed: Option<u64>) -> Result<LabelMap> {
    ratios.validate()?;

    let mut shuffled = ids.to_vec();
    let mut rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
    shuffled.shuffle(&mut rng);

    let total = shuffled.len() as f64;
    let train_end = (total * ratios.train).round() as usize;
    let val_end = (total * (ratios.train + ratios.validation)).round() as usize;
    let test_end = (total * (ratios.train + ratios.validation + ratios.test)).round() as usize;

    let labels = shuffled
        .into_iter()
        .enumerate()
        .map(|(i, id)| {
            let label = if i < train_end {
                Some(PartitionLabel::Train)
            } else if i < val_end {
                Some(PartitionLabel::Validation)
            } else if i < test_end {
                Some(PartitionLabel::Test)
            } else {
                None
            };
            (id, label)
        })
        .collect();

    Ok(labels)
}
