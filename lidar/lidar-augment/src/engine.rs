//! Sensor-origin moves with per-frame rollback snapshots.

use std::collections::{BTreeSet, HashMap};

use lidar_types::{AngleUnit, FrameId, FrameStore, Heading, LengthUnit, PolarSample};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AugmentError, Result};
use crate::polar::translate_samples;

/// One "move the sensor origin" request.
///
/// # Example
///
/// ```
/// use lidar_augment::MoveRequest;
/// use lidar_types::{Heading, LengthUnit};
///
/// let request = MoveRequest::new(Heading::North, 250.0, LengthUnit::Millimeters);
/// assert!(request.validate().is_ok());
///
/// // Samples shift opposite to the sensor.
/// let offset = request.sample_offset(LengthUnit::Meters);
/// assert!((offset.y + 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Direction the sensor origin moves in.
    pub heading: Heading,
    /// Distance moved, in `unit`.
    pub step: f64,
    /// Unit of `step`.
    pub unit: LengthUnit,
}

impl MoveRequest {
    /// Creates a request.
    #[must_use]
    pub const fn new(heading: Heading, step: f64, unit: LengthUnit) -> Self {
        Self {
            heading,
            step,
            unit,
        }
    }

    /// Checks that the step is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::InvalidStep`] otherwise.
    pub fn validate(&self) -> Result<()> {
        if self.step.is_finite() && self.step > 0.0 {
            Ok(())
        } else {
            Err(AugmentError::InvalidStep(self.step))
        }
    }

    /// Translation applied to samples stored in `native` units.
    ///
    /// Moving the sensor one way moves every return the other way.
    #[must_use]
    pub fn sample_offset(&self, native: LengthUnit) -> Vector2<f64> {
        let distance = self.unit.convert(self.step, native);
        let [x, y] = self.heading.unit_vector();
        -Vector2::new(x, y) * distance
    }
}

/// Rollback state for one augmented frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ModificationRecord {
    original: Vec<PolarSample>,
    offset: Vector2<f64>,
    modified: bool,
}

impl ModificationRecord {
    /// Samples as they were before the first move.
    #[must_use]
    pub fn original(&self) -> &[PolarSample] {
        &self.original
    }

    /// Total translation applied to the snapshot, in the frame's range unit.
    #[must_use]
    pub const fn offset(&self) -> Vector2<f64> {
        self.offset
    }

    /// Whether the frame currently differs from its snapshot.
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }
}

/// Applies reversible sensor-origin moves to the store's current frame.
///
/// The first move of a frame snapshots its samples. Later moves accumulate
/// into one offset and the frame is always recomputed from the snapshot, so
/// opposite moves give the snapshot back and [`revert`](Self::revert)
/// always returns to the pre-augmentation data. A return that lands on the
/// origin on the way is not lost.
///
/// # Example
///
/// ```
/// use lidar_augment::{AugmentationEngine, MoveRequest};
/// use lidar_types::{FrameStore, Heading, InMemoryFrameStore, LengthUnit, LidarFrame, PolarSample};
///
/// let frame = LidarFrame::new(0, vec![PolarSample::new(0.0, 2.0)]);
/// let mut store = InMemoryFrameStore::new(vec![frame]).unwrap();
/// let mut engine = AugmentationEngine::new();
///
/// let east = MoveRequest::new(Heading::East, 0.5, LengthUnit::Meters);
/// engine.move_origin(&mut store, &east).unwrap();
/// assert!(engine.is_modified(0));
/// assert!((store.current().unwrap().samples[0].range - 1.5).abs() < 1e-9);
///
/// engine.revert(&mut store, 0).unwrap();
/// assert!(!engine.is_modified(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AugmentationEngine {
    records: HashMap<FrameId, ModificationRecord>,
}

impl AugmentationEngine {
    /// Creates an engine with no modified frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the sensor origin of the store's current frame.
    ///
    /// Angular velocity and units of the frame are left untouched. Returns
    /// the id of the frame that was rewritten.
    ///
    /// # Errors
    ///
    /// - [`AugmentError::InvalidStep`] for a non-positive or non-finite step
    /// - [`AugmentError::NoActiveFrame`] if the store is not positioned
    /// - [`AugmentError::Store`] if the store rejects the new samples
    ///
    /// Nothing is changed on error.
    pub fn move_origin<S: FrameStore>(
        &mut self,
        store: &mut S,
        request: &MoveRequest,
    ) -> Result<FrameId> {
        request.validate()?;
        let frame = store.current().ok_or(AugmentError::NoActiveFrame)?;

        let id = frame.id;
        let step = request.sample_offset(frame.range_unit);
        let (base, offset) = match self.records.get(&id) {
            Some(record) => (record.original.as_slice(), record.offset + step),
            None => (frame.samples.as_slice(), step),
        };
        let moved = project(base, offset, frame.angle_unit);
        let snapshot = (!self.records.contains_key(&id)).then(|| frame.samples.clone());

        store.set_samples(id, moved)?;

        if let Some(original) = snapshot {
            debug!(frame = id, samples = original.len(), "snapshot taken");
            self.records.insert(
                id,
                ModificationRecord {
                    original,
                    offset,
                    modified: true,
                },
            );
        } else if let Some(record) = self.records.get_mut(&id) {
            record.offset = offset;
            record.modified = true;
        }

        info!(
            frame = id,
            heading = ?request.heading,
            step = request.step,
            unit = %request.unit,
            "sensor origin moved"
        );
        Ok(id)
    }

    /// Restores frame `id` from its snapshot and forgets the record.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::NoSnapshot`] if the frame was never moved (or
    /// was already reverted or committed), and [`AugmentError::Store`] if the
    /// store rejects the restore; the record is kept in that case.
    pub fn revert<S: FrameStore>(&mut self, store: &mut S, id: FrameId) -> Result<()> {
        let original = self
            .records
            .get(&id)
            .ok_or(AugmentError::NoSnapshot(id))?
            .original
            .clone();

        store.set_samples(id, original)?;
        self.records.remove(&id);
        info!(frame = id, "frame reverted");
        Ok(())
    }

    /// Reverts the store's current frame.
    ///
    /// # Errors
    ///
    /// Returns [`AugmentError::NoActiveFrame`] if the store is not positioned,
    /// otherwise as [`revert`](Self::revert).
    pub fn revert_current<S: FrameStore>(&mut self, store: &mut S) -> Result<FrameId> {
        let id = store.current().ok_or(AugmentError::NoActiveFrame)?.id;
        self.revert(store, id)?;
        Ok(id)
    }

    /// Whether frame `id` has unsaved modifications.
    #[must_use]
    pub fn is_modified(&self, id: FrameId) -> bool {
        self.records.get(&id).is_some_and(ModificationRecord::is_modified)
    }

    /// Ids of all frames with unsaved modifications, ascending.
    #[must_use]
    pub fn modified_ids(&self) -> BTreeSet<FrameId> {
        self.records
            .iter()
            .filter(|(_, record)| record.is_modified())
            .map(|(&id, _)| id)
            .collect()
    }

    /// Rollback record of frame `id`, if any.
    #[must_use]
    pub fn record(&self, id: FrameId) -> Option<&ModificationRecord> {
        self.records.get(&id)
    }

    /// Samples of frame `id` before its first move, if any.
    #[must_use]
    pub fn snapshot(&self, id: FrameId) -> Option<&[PolarSample]> {
        self.records.get(&id).map(ModificationRecord::original)
    }

    /// Accepts the current samples of frame `id` after an external save.
    ///
    /// Returns true if there was a record to clear.
    pub fn commit(&mut self, id: FrameId) -> bool {
        let cleared = self.records.remove(&id).is_some();
        if cleared {
            debug!(frame = id, "modification committed");
        }
        cleared
    }

    /// Accepts every modification. Returns the cleared ids, ascending.
    pub fn commit_all(&mut self) -> Vec<FrameId> {
        let mut ids: Vec<FrameId> = self.records.drain().map(|(id, _)| id).collect();
        ids.sort_unstable();
        if !ids.is_empty() {
            info!(frames = ids.len(), "modifications committed");
        }
        ids
    }
}

/// Samples of `original` seen from an origin shifted by `offset`.
fn project(original: &[PolarSample], offset: Vector2<f64>, unit: AngleUnit) -> Vec<PolarSample> {
    if offset == Vector2::zeros() {
        return original.to_vec();
    }
    translate_samples(original, offset, unit)
}
