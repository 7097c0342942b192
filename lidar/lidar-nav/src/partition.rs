//! Per-label ordered frame sequences.

use std::collections::BTreeMap;
use std::fmt;

use lidar_types::{FrameId, PartitionLabel, View};
use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// Mapping from every known frame to its partition, if any.
///
/// Ids mapped to `None` belong only to the unpartitioned sequence.
pub type LabelMap = BTreeMap<FrameId, Option<PartitionLabel>>;

/// Frame ids grouped by partition, each group ascending by id.
///
/// Derived from a [`LabelMap`] and never updated partially: any change to
/// the mapping means building a new index.
///
/// # Example
///
/// ```
/// use lidar_nav::{LabelMap, PartitionIndex};
/// use lidar_types::{PartitionLabel, View};
///
/// let labels: LabelMap = (0..6)
///     .map(|id| (id, (id % 2 == 0).then_some(PartitionLabel::Train)))
///     .collect();
/// let index = PartitionIndex::build(&labels);
///
/// assert_eq!(index.sequence_for(View::Train), &[0, 2, 4]);
/// assert_eq!(index.position_of(View::Train, 4), Some(2));
/// assert_eq!(index.position_of(View::Train, 3), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionIndex {
    all: Vec<FrameId>,
    groups: [Vec<FrameId>; 3],
}

impl PartitionIndex {
    /// Builds the index. An empty mapping yields an empty index.
    #[must_use]
    pub fn build(labels: &LabelMap) -> Self {
        let mut index = Self {
            all: Vec::with_capacity(labels.len()),
            groups: Default::default(),
        };

        // BTreeMap iteration is ascending, so every group comes out sorted.
        for (&id, label) in labels {
            index.all.push(id);
            if let Some(label) = label {
                index.groups[label.index()].push(id);
            }
        }
        index
    }

    /// Builds the index, requiring at least one frame.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::EmptyInput`] if `labels` is empty.
    pub fn try_build(labels: &LabelMap) -> Result<Self> {
        if labels.is_empty() {
            return Err(NavError::EmptyInput);
        }
        Ok(Self::build(labels))
    }

    /// Ordered ids browsed by `view`. `Original` yields every known id.
    #[must_use]
    pub fn sequence_for(&self, view: View) -> &[FrameId] {
        match view.label() {
            None => &self.all,
            Some(label) => &self.groups[label.index()],
        }
    }

    /// Length of `view`'s sequence.
    #[must_use]
    pub fn len(&self, view: View) -> usize {
        self.sequence_for(view).len()
    }

    /// Returns true if no frames are indexed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Local position of `id` within `view`, or `None` if it is not a member.
    #[must_use]
    pub fn position_of(&self, view: View, id: FrameId) -> Option<usize> {
        self.sequence_for(view).binary_search(&id).ok()
    }

    /// Id at local position `pointer` of `view`.
    #[must_use]
    pub fn id_at(&self, view: View, pointer: usize) -> Option<FrameId> {
        self.sequence_for(view).get(pointer).copied()
    }

    /// Partition of `id`, or `None` if unlabelled or unknown.
    #[must_use]
    pub fn label_of(&self, id: FrameId) -> Option<PartitionLabel> {
        PartitionLabel::ALL
            .into_iter()
            .find(|label| self.groups[label.index()].binary_search(&id).is_ok())
    }

    /// Per-partition frame counts.
    #[must_use]
    pub fn summary(&self) -> PartitionSummary {
        let train = self.len(View::Train);
        let validation = self.len(View::Validation);
        let test = self.len(View::Test);
        PartitionSummary {
            total: self.all.len(),
            train,
            validation,
            test,
            unassigned: self.all.len() - train - validation - test,
        }
    }
}

/// Frame counts per partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSummary {
    /// Total frames.
    pub total: usize,
    /// Frames labelled train.
    pub train: usize,
    /// Frames labelled validation.
    pub validation: usize,
    /// Frames labelled test.
    pub test: usize,
    /// Frames with no label.
    pub unassigned: usize,
}

impl fmt::Display for PartitionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames (train {}, validation {}, test {}, unassigned {})",
            self.total, self.train, self.validation, self.test, self.unassigned
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: u64, assign: &[(FrameId, PartitionLabel)]) -> LabelMap {
        let mut map: LabelMap = (0..n).map(|id| (id, None)).collect();
        for &(id, label) in assign {
            map.insert(id, Some(label));
        }
        map
    }

    #[test]
    fn build_groups_ascending() {
        let map = labels(
            10,
            &[
                (7, PartitionLabel::Test),
                (2, PartitionLabel::Train),
                (9, PartitionLabel::Train),
                (5, PartitionLabel::Train),
            ],
        );
        let index = PartitionIndex::build(&map);

        assert_eq!(index.sequence_for(View::Train), &[2, 5, 9]);
        assert_eq!(index.sequence_for(View::Test), &[7]);
        assert!(index.sequence_for(View::Validation).is_empty());
        assert_eq!(index.len(View::Original), 10);
    }

    #[test]
    fn build_empty_is_allowed() {
        let index = PartitionIndex::build(&LabelMap::new());
        assert!(index.is_empty());
        assert_eq!(index.len(View::Original), 0);
    }

    #[test]
    fn try_build_rejects_empty() {
        assert_eq!(
            PartitionIndex::try_build(&LabelMap::new()),
            Err(NavError::EmptyInput)
        );
        assert!(PartitionIndex::try_build(&labels(1, &[])).is_ok());
    }

    #[test]
    fn position_of_absent_id() {
        let index = PartitionIndex::build(&labels(5, &[(3, PartitionLabel::Validation)]));
        assert_eq!(index.position_of(View::Validation, 3), Some(0));
        assert_eq!(index.position_of(View::Validation, 2), None);
        assert_eq!(index.position_of(View::Original, 4), Some(4));
        assert_eq!(index.position_of(View::Original, 40), None);
    }

    #[test]
    fn labels_are_disjoint() {
        let index = PartitionIndex::build(&labels(
            4,
            &[(0, PartitionLabel::Train), (1, PartitionLabel::Test)],
        ));
        assert_eq!(index.label_of(0), Some(PartitionLabel::Train));
        assert_eq!(index.label_of(1), Some(PartitionLabel::Test));
        assert_eq!(index.label_of(2), None);
    }

    #[test]
    fn summary_counts() {
        let index = PartitionIndex::build(&labels(
            6,
            &[
                (0, PartitionLabel::Train),
                (1, PartitionLabel::Train),
                (2, PartitionLabel::Validation),
            ],
        ));
        let summary = index.summary();
        assert_eq!(summary.total, 6);
        assert_eq!(summary.train, 2);
        assert_eq!(summary.validation, 1);
        assert_eq!(summary.test, 0);
        assert_eq!(summary.unassigned, 3);
        assert!(summary.to_string().contains("train 2"));
    }
}
