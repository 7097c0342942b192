//! Partition-aware navigation state machine.
//!
//! The controller owns one pointer per [`View`] and is the single source of
//! truth for "which frame is shown". The [`FrameStore`] pointer is a derived
//! cache that the controller resynchronizes after every state change.

use std::collections::HashSet;

use lidar_types::{FrameId, FrameStore, LidarError, NavDirection, PartitionLabel, View};
use tracing::{debug, info, warn};

use crate::error::{NavError, Result};
use crate::partition::{LabelMap, PartitionIndex};

/// Which enable rule applies to the navigation controls of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPath {
    /// A partition view; bounds come from the partition's own sequence.
    Partitioned,
    /// The unpartitioned sequence of all frames.
    Unpartitioned,
}

/// Enable state of the prev/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButtons {
    /// Whether stepping back is possible.
    pub prev: bool,
    /// Whether stepping forward is possible.
    pub next: bool,
    /// Rule the state was derived under.
    pub path: ButtonPath,
}

/// Navigation over the unpartitioned sequence and its partitions.
///
/// All mutating operations take the frame store explicitly. The controller
/// only ever moves the store's pointer; frame content belongs to whoever
/// edits the current frame.
///
/// # Example
///
/// ```
/// use lidar_nav::{LabelMap, NavigationController};
/// use lidar_types::{InMemoryFrameStore, LidarFrame, NavDirection, PartitionLabel, View};
///
/// let frames = (0..5).map(|id| LidarFrame::new(id, Vec::new())).collect();
/// let mut store = InMemoryFrameStore::new(frames).unwrap();
///
/// let mut labels = LabelMap::new();
/// labels.insert(1, Some(PartitionLabel::Test));
/// labels.insert(3, Some(PartitionLabel::Test));
///
/// let mut nav = NavigationController::load(&mut store, &labels).unwrap();
/// nav.switch_view(&mut store, View::Test).unwrap();
/// assert_eq!(nav.current_id(), Some(1));
///
/// assert!(nav.advance(&mut store, NavDirection::Next).unwrap());
/// assert_eq!(nav.current_id(), Some(3));
/// assert!(!nav.can_go_next());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    labels: LabelMap,
    index: PartitionIndex,
    active: View,
    pointers: [usize; 4],
}

impl NavigationController {
    /// Builds a controller over the frames in `store` and positions the store
    /// on the first frame of the unpartitioned sequence.
    ///
    /// Frames without an entry in `labels` are unpartitioned. Labels naming
    /// frames the store does not hold are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Store`] if the store refuses to jump to one of its
    /// own ids.
    pub fn load<S: FrameStore>(store: &mut S, labels: &LabelMap) -> Result<Self> {
        let labels = merge_labels(&store.ids(), labels);
        let index = PartitionIndex::build(&labels);
        info!(summary = %index.summary(), "partition index built");

        let nav = Self {
            labels,
            index,
            active: View::Original,
            pointers: [0; 4],
        };
        if let Some(first) = nav.index.id_at(View::Original, 0) {
            store.jump_to(first)?;
        }
        Ok(nav)
    }

    /// The view currently browsed.
    #[must_use]
    pub const fn active_view(&self) -> View {
        self.active
    }

    /// The current partition index.
    #[must_use]
    pub const fn index(&self) -> &PartitionIndex {
        &self.index
    }

    /// The label mapping the index was built from.
    #[must_use]
    pub const fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Effective pointer of `view`, or `None` if the view has no frames.
    #[must_use]
    pub fn pointer(&self, view: View) -> Option<usize> {
        let len = self.index.len(view);
        (len > 0).then(|| self.pointers[view.index()].min(len - 1))
    }

    /// Id the active view points at, resolved without touching the store.
    #[must_use]
    pub fn current_id(&self) -> Option<FrameId> {
        self.pointer(self.active)
            .and_then(|p| self.index.id_at(self.active, p))
    }

    /// Whether the active view can step back.
    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.pointer(self.active).is_some_and(|p| p > 0)
    }

    /// Whether the active view can step forward.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        let len = self.index.len(self.active);
        self.pointer(self.active).is_some_and(|p| p + 1 < len)
    }

    /// Which enable rule applies to `view`.
    #[must_use]
    pub const fn button_state_path(view: View) -> ButtonPath {
        if view.is_partition() {
            ButtonPath::Partitioned
        } else {
            ButtonPath::Unpartitioned
        }
    }

    /// Enable state of the prev/next controls for the active view.
    #[must_use]
    pub fn buttons(&self) -> NavButtons {
        NavButtons {
            prev: self.can_go_prev(),
            next: self.can_go_next(),
            path: Self::button_state_path(self.active),
        }
    }

    /// Makes `view` active and moves the store to that view's pointer.
    ///
    /// When leaving `Original`, the store's current frame is first recorded
    /// as the `Original` position. Other pointers are only read. Returns the
    /// id now shown, or `None` if `view` has no frames (the store is left
    /// where it was).
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Store`] if the store rejects the jump even after
    /// the index was rebuilt from its surviving frames.
    pub fn switch_view<S: FrameStore>(&mut self, store: &mut S, view: View) -> Result<Option<FrameId>> {
        if self.active == View::Original {
            self.capture_original(store);
        }

        debug!(from = %self.active, to = %view, "switching view");
        self.active = view;
        self.resync(store)
    }

    /// Steps the active view one frame in `direction`.
    ///
    /// Returns `Ok(false)` without changing any state when the step would
    /// leave the view, including when the view is empty.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::NoActiveSequence`] if there are no frames at all,
    /// and [`NavError::Store`] if the store cannot be repositioned.
    pub fn advance<S: FrameStore>(&mut self, store: &mut S, direction: NavDirection) -> Result<bool> {
        self.step(store, direction, true)
    }

    /// Replaces the label mapping after an external split.
    ///
    /// The index is rebuilt in full and every pointer re-clamped. The active
    /// view keeps its frame if that frame is still a member.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Store`] if the store cannot be repositioned.
    pub fn apply_labels<S: FrameStore>(&mut self, store: &mut S, labels: &LabelMap) -> Result<Option<FrameId>> {
        if self.active == View::Original {
            self.capture_original(store);
        }
        self.rebuild(merge_labels(&store.ids(), labels));
        self.resync(store)
    }

    /// Moves one frame into another partition (or out of all partitions).
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Store`] wrapping [`LidarError::NotFound`] for an
    /// unknown id.
    pub fn reassign<S: FrameStore>(
        &mut self,
        store: &mut S,
        id: FrameId,
        label: Option<PartitionLabel>,
    ) -> Result<Option<FrameId>> {
        if !self.labels.contains_key(&id) {
            return Err(LidarError::NotFound(id).into());
        }
        let mut labels = self.labels.clone();
        labels.insert(id, label);
        info!(frame = id, label = ?label, "reassigning frame");
        self.apply_labels(store, &labels)
    }

    fn step<S: FrameStore>(&mut self, store: &mut S, direction: NavDirection, heal: bool) -> Result<bool> {
        if self.index.is_empty() {
            return Err(NavError::no_active_sequence(self.active));
        }
        let Some(pointer) = self.repaired_pointer() else {
            debug!(view = %self.active, "navigation blocked: view is empty");
            return Ok(false);
        };

        let len = self.index.len(self.active);
        let candidate = match direction {
            NavDirection::Prev => pointer.checked_sub(1),
            NavDirection::Next => Some(pointer + 1).filter(|&c| c < len),
        };
        let Some((candidate, id)) =
            candidate.and_then(|c| self.index.id_at(self.active, c).map(|id| (c, id)))
        else {
            debug!(view = %self.active, pointer, ?direction, "navigation blocked at boundary");
            return Ok(false);
        };

        match store.jump_to(id) {
            Ok(()) => {
                self.pointers[self.active.index()] = candidate;
                Ok(true)
            }
            Err(LidarError::NotFound(missing)) if heal => {
                warn!(frame = missing, view = %self.active, "frame missing from store; rebuilding index");
                self.retain_store_frames(store);
                self.resync(store)?;
                self.step(store, direction, false)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Records the store's current frame as the `Original` position.
    fn capture_original<S: FrameStore>(&mut self, store: &S) {
        let Some(frame) = store.current() else {
            return;
        };
        match self.index.position_of(View::Original, frame.id) {
            Some(position) => self.pointers[View::Original.index()] = position,
            None => warn!(frame = frame.id, "store frame is not indexed; keeping previous position"),
        }
    }

    /// Moves the store to the active view's pointer.
    fn resync<S: FrameStore>(&mut self, store: &mut S) -> Result<Option<FrameId>> {
        let Some(id) = self.resolve_active() else {
            debug!(view = %self.active, "view is empty; store left in place");
            return Ok(None);
        };

        match store.jump_to(id) {
            Ok(()) => Ok(Some(id)),
            Err(LidarError::NotFound(missing)) => {
                warn!(frame = missing, view = %self.active, "frame missing from store; rebuilding index");
                self.retain_store_frames(store);
                match self.resolve_active() {
                    Some(id) => {
                        store.jump_to(id)?;
                        Ok(Some(id))
                    }
                    None => Ok(None),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    fn resolve_active(&mut self) -> Option<FrameId> {
        let pointer = self.repaired_pointer()?;
        self.index.id_at(self.active, pointer)
    }

    /// Active pointer, clamped into range if a rebuild left it dangling.
    fn repaired_pointer(&mut self) -> Option<usize> {
        let len = self.index.len(self.active);
        if len == 0 {
            return None;
        }
        let slot = &mut self.pointers[self.active.index()];
        if *slot >= len {
            warn!(view = %self.active, pointer = *slot, len, "pointer out of range; clamping");
            *slot = len - 1;
        }
        Some(*slot)
    }

    /// Drops frames the store no longer holds and rebuilds.
    fn retain_store_frames<S: FrameStore>(&mut self, store: &S) {
        let present: HashSet<FrameId> = store.ids().into_iter().collect();
        let mut labels = self.labels.clone();
        labels.retain(|id, _| present.contains(id));
        for id in present {
            labels.entry(id).or_insert(None);
        }
        self.rebuild(labels);
    }

    fn rebuild(&mut self, labels: LabelMap) {
        let index = PartitionIndex::build(&labels);
        for view in View::ALL {
            let slot = view.index();
            let anchor = self.index.id_at(view, self.pointers[slot]);
            self.pointers[slot] = reclamp(&index, view, anchor, self.pointers[slot]);
        }
        self.labels = labels;
        self.index = index;
        info!(summary = %self.index.summary(), "partition index rebuilt");
    }
}

/// New pointer for `view` after a rebuild.
///
/// Follows the previously shown frame when it survives, otherwise lands on
/// the nearest following frame, clamped to the sequence.
fn reclamp(index: &PartitionIndex, view: View, anchor: Option<FrameId>, pointer: usize) -> usize {
    let sequence = index.sequence_for(view);
    if sequence.is_empty() {
        return 0;
    }
    let wanted = anchor.map_or(pointer, |id| sequence.partition_point(|&x| x < id));
    wanted.min(sequence.len() - 1)
}

fn merge_labels(ids: &[FrameId], labels: &LabelMap) -> LabelMap {
    let merged: LabelMap = ids
        .iter()
        .map(|&id| (id, labels.get(&id).copied().flatten()))
        .collect();

    let dropped = labels.keys().filter(|id| !merged.contains_key(id)).count();
    if dropped > 0 {
        warn!(dropped, "labels reference frames the store does not hold");
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidar_types::{InMemoryFrameStore, LidarFrame};

    fn store(n: u64) -> InMemoryFrameStore {
        let frames = (0..n).map(|id| LidarFrame::new(id, Vec::new())).collect();
        InMemoryFrameStore::new(frames).unwrap()
    }

    fn train(ids: &[FrameId]) -> LabelMap {
        ids.iter().map(|&id| (id, Some(PartitionLabel::Train))).collect()
    }

    fn store_id(store: &InMemoryFrameStore) -> Option<FrameId> {
        store.current().map(|f| f.id)
    }

    #[test]
    fn load_positions_on_first_frame() {
        let mut s = store(4);
        s.jump_to(3).unwrap();
        let nav = NavigationController::load(&mut s, &LabelMap::new()).unwrap();
        assert_eq!(nav.active_view(), View::Original);
        assert_eq!(store_id(&s), Some(0));
        assert!(!nav.can_go_prev());
        assert!(nav.can_go_next());
    }

    #[test]
    fn load_drops_unknown_labels() {
        let mut s = store(3);
        let nav = NavigationController::load(&mut s, &train(&[1, 99])).unwrap();
        assert_eq!(nav.index().sequence_for(View::Train), &[1]);
        assert!(!nav.labels().contains_key(&99));
    }

    #[test]
    fn advance_blocked_at_bounds() {
        let mut s = store(2);
        let mut nav = NavigationController::load(&mut s, &LabelMap::new()).unwrap();

        assert!(!nav.advance(&mut s, NavDirection::Prev).unwrap());
        assert!(nav.advance(&mut s, NavDirection::Next).unwrap());
        assert!(!nav.advance(&mut s, NavDirection::Next).unwrap());
        assert_eq!(store_id(&s), Some(1));
        assert_eq!(nav.pointer(View::Original), Some(1));
    }

    #[test]
    fn advance_without_frames_fails() {
        let mut s = store(0);
        let mut nav = NavigationController::load(&mut s, &LabelMap::new()).unwrap();
        assert_eq!(
            nav.advance(&mut s, NavDirection::Next),
            Err(NavError::no_active_sequence(View::Original))
        );
        assert!(!nav.can_go_prev());
        assert!(!nav.can_go_next());
    }

    #[test]
    fn switch_to_empty_view_leaves_store() {
        let mut s = store(5);
        let mut nav = NavigationController::load(&mut s, &train(&[1])).unwrap();
        nav.advance(&mut s, NavDirection::Next).unwrap();

        assert_eq!(nav.switch_view(&mut s, View::Test).unwrap(), None);
        assert_eq!(store_id(&s), Some(1));
        assert_eq!(nav.current_id(), None);
        assert!(!nav.advance(&mut s, NavDirection::Next).unwrap());
        assert!(!nav.advance(&mut s, NavDirection::Prev).unwrap());
    }

    #[test]
    fn leaving_original_captures_store_position() {
        let mut s = store(10);
        let mut nav = NavigationController::load(&mut s, &train(&[2, 4])).unwrap();

        // The store was moved by something other than the controller.
        s.jump_to(7).unwrap();
        nav.switch_view(&mut s, View::Train).unwrap();
        nav.switch_view(&mut s, View::Original).unwrap();

        assert_eq!(store_id(&s), Some(7));
        assert!(nav.can_go_prev());
    }

    #[test]
    fn button_path_keys_off_view() {
        assert_eq!(
            NavigationController::button_state_path(View::Original),
            ButtonPath::Unpartitioned
        );
        for view in [View::Train, View::Validation, View::Test] {
            assert_eq!(
                NavigationController::button_state_path(view),
                ButtonPath::Partitioned
            );
        }
    }

    #[test]
    fn buttons_for_empty_partition_use_partitioned_path() {
        let mut s = store(3);
        let mut nav = NavigationController::load(&mut s, &LabelMap::new()).unwrap();
        nav.switch_view(&mut s, View::Validation).unwrap();
        assert_eq!(
            nav.buttons(),
            NavButtons {
                prev: false,
                next: false,
                path: ButtonPath::Partitioned,
            }
        );
    }

    #[test]
    fn reassign_keeps_active_frame() {
        let mut s = store(6);
        let mut nav = NavigationController::load(&mut s, &train(&[1, 3, 5])).unwrap();
        nav.switch_view(&mut s, View::Train).unwrap();
        nav.advance(&mut s, NavDirection::Next).unwrap();
        assert_eq!(nav.current_id(), Some(3));

        // Moving an earlier frame out shifts local positions, not the frame.
        nav.reassign(&mut s, 1, Some(PartitionLabel::Test)).unwrap();
        assert_eq!(nav.current_id(), Some(3));
        assert_eq!(nav.pointer(View::Train), Some(0));
        assert_eq!(store_id(&s), Some(3));
        assert_eq!(nav.index().sequence_for(View::Test), &[1]);
    }

    #[test]
    fn reassign_active_frame_out_clamps() {
        let mut s = store(6);
        let mut nav = NavigationController::load(&mut s, &train(&[1, 3])).unwrap();
        nav.switch_view(&mut s, View::Train).unwrap();
        nav.advance(&mut s, NavDirection::Next).unwrap();

        nav.reassign(&mut s, 3, None).unwrap();
        assert_eq!(nav.current_id(), Some(1));
        assert_eq!(store_id(&s), Some(1));
        assert!(!nav.can_go_next());
    }

    #[test]
    fn reassign_unknown_frame_fails() {
        let mut s = store(2);
        let mut nav = NavigationController::load(&mut s, &LabelMap::new()).unwrap();
        assert_eq!(
            nav.reassign(&mut s, 42, Some(PartitionLabel::Train)),
            Err(NavError::Store(LidarError::NotFound(42)))
        );
    }

    #[test]
    fn removed_frame_is_healed_on_switch() {
        let mut s = store(6);
        let mut nav = NavigationController::load(&mut s, &train(&[2, 4])).unwrap();
        nav.switch_view(&mut s, View::Train).unwrap();
        nav.advance(&mut s, NavDirection::Next).unwrap();
        nav.switch_view(&mut s, View::Original).unwrap();

        s.remove(4).unwrap();
        assert_eq!(nav.switch_view(&mut s, View::Train).unwrap(), Some(2));
        assert_eq!(nav.index().sequence_for(View::Train), &[2]);
        assert!(!nav.can_go_next());
    }

    #[test]
    fn removed_frame_is_healed_on_advance() {
        let mut s = store(5);
        let mut nav = NavigationController::load(&mut s, &LabelMap::new()).unwrap();
        s.remove(1).unwrap();

        assert!(nav.advance(&mut s, NavDirection::Next).unwrap());
        assert_eq!(store_id(&s), Some(2));
        assert_eq!(nav.index().len(View::Original), 4);
    }
}
