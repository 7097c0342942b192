//! Frame storage with a single movable read pointer.

use std::collections::HashMap;

use crate::error::{LidarError, Result};
use crate::frame::{FrameId, LidarFrame, PolarSample};

/// Ordered frame storage with one read pointer.
///
/// The pointer is a cache of "which frame is shown". Navigation decides what
/// it should be and augmentation only rewrites the content of the frame under
/// it; implementations must keep both operations O(1) or close to it.
pub trait FrameStore {
    /// All frame ids, ascending.
    fn ids(&self) -> Vec<FrameId>;

    /// Number of frames.
    fn len(&self) -> usize;

    /// Returns true if the store holds no frames.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frame under the read pointer, if positioned.
    fn current(&self) -> Option<&LidarFrame>;

    /// Looks up a frame by id without moving the pointer.
    fn get(&self, id: FrameId) -> Option<&LidarFrame>;

    /// Position of the read pointer in the ascending id order.
    fn pointer(&self) -> Option<usize>;

    /// Moves the read pointer to the frame with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LidarError::NotFound`] if no such frame exists; the pointer
    /// is left unchanged.
    fn jump_to(&mut self, id: FrameId) -> Result<()>;

    /// Replaces the samples of frame `id` in place.
    ///
    /// # Errors
    ///
    /// Returns [`LidarError::NotFound`] for an unknown id and
    /// [`LidarError::SampleCountMismatch`] if the sample count changes.
    fn set_samples(&mut self, id: FrameId, samples: Vec<PolarSample>) -> Result<()>;

    /// Store-level "not at the first frame" flag.
    ///
    /// Informational only: a navigation controller's per-view pointer is the
    /// authority on whether stepping back is possible.
    fn has_prev(&self) -> bool {
        self.pointer().is_some_and(|p| p > 0)
    }

    /// Store-level "not at the last frame" flag. Informational only.
    fn has_next(&self) -> bool {
        self.pointer().is_some_and(|p| p + 1 < self.len())
    }
}

/// In-memory [`FrameStore`] backed by an id-sorted vector.
///
/// # Example
///
/// ```
/// use lidar_types::{FrameStore, InMemoryFrameStore, LidarFrame};
///
/// let frames = (0..3).map(|id| LidarFrame::new(id, Vec::new())).collect();
/// let mut store = InMemoryFrameStore::new(frames).unwrap();
///
/// assert_eq!(store.current().map(|f| f.id), Some(0));
/// store.jump_to(2).unwrap();
/// assert_eq!(store.pointer(), Some(2));
/// assert!(store.jump_to(9).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryFrameStore {
    frames: Vec<LidarFrame>,
    positions: HashMap<FrameId, usize>,
    cursor: Option<usize>,
}

impl InMemoryFrameStore {
    /// Creates a store positioned on the lowest id, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LidarError::DuplicateFrame`] if two frames share an id.
    pub fn new(mut frames: Vec<LidarFrame>) -> Result<Self> {
        frames.sort_by_key(|f| f.id);
        if let Some(pair) = frames.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(LidarError::DuplicateFrame(pair[0].id));
        }

        let mut store = Self {
            frames,
            positions: HashMap::new(),
            cursor: None,
        };
        store.reindex();
        store.cursor = if store.frames.is_empty() { None } else { Some(0) };
        Ok(store)
    }

    /// All frames, ascending by id.
    #[must_use]
    pub fn frames(&self) -> &[LidarFrame] {
        &self.frames
    }

    /// Removes a frame, as an external deletion would.
    ///
    /// If the removed frame was current, the pointer moves to the frame that
    /// took its position (or the new last frame).
    ///
    /// # Errors
    ///
    /// Returns [`LidarError::NotFound`] for an unknown id.
    pub fn remove(&mut self, id: FrameId) -> Result<LidarFrame> {
        let pos = *self.positions.get(&id).ok_or(LidarError::NotFound(id))?;
        let frame = self.frames.remove(pos);
        self.reindex();

        self.cursor = match self.cursor {
            _ if self.frames.is_empty() => None,
            Some(c) if c > pos => Some(c - 1),
            Some(c) => Some(c.min(self.frames.len() - 1)),
            None => None,
        };
        Ok(frame)
    }

    fn reindex(&mut self) {
        self.positions = self
            .frames
            .iter()
            .enumerate()
            .map(|(i, f)| (f.id, i))
            .collect();
    }
}

impl FrameStore for InMemoryFrameStore {
    fn ids(&self) -> Vec<FrameId> {
        self.frames.iter().map(|f| f.id).collect()
    }

    fn len(&self) -> usize {
        self.frames.len()
    }

    fn current(&self) -> Option<&LidarFrame> {
        self.cursor.and_then(|c| self.frames.get(c))
    }

    fn get(&self, id: FrameId) -> Option<&LidarFrame> {
        self.positions.get(&id).and_then(|&i| self.frames.get(i))
    }

    fn pointer(&self) -> Option<usize> {
        self.cursor
    }

    fn jump_to(&mut self, id: FrameId) -> Result<()> {
        let pos = *self.positions.get(&id).ok_or(LidarError::NotFound(id))?;
        self.cursor = Some(pos);
        Ok(())
    }

    fn set_samples(&mut self, id: FrameId, samples: Vec<PolarSample>) -> Result<()> {
        let pos = *self.positions.get(&id).ok_or(LidarError::NotFound(id))?;
        let frame = &mut self.frames[pos];
        if frame.samples.len() != samples.len() {
            return Err(LidarError::sample_mismatch(frame.samples.len(), samples.len()));
        }
        frame.samples = samples;
        Ok(())
    }
}
