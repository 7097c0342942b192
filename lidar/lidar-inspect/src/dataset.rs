//! Loading and saving frame and label files.
//!
//! Frames are a JSON array of [`LidarFrame`]. Labels are a JSON object
//! mapping frame ids to label strings, e.g. `{"2": "TRAIN", "5": "train"}`;
//! label strings are matched case-insensitively.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use lidar_nav::LabelMap;
use lidar_types::{FrameId, FrameStore, LidarFrame, PartitionLabel, parse_label};
use tracing::info;

use crate::error::{InspectError, Result};

/// Reads frames from a JSON array.
///
/// # Errors
///
/// Returns [`InspectError::Serialization`] for malformed input.
pub fn frames_from_reader<R: Read>(reader: R) -> Result<Vec<LidarFrame>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Loads frames from a JSON file.
///
/// # Errors
///
/// Returns [`InspectError::Io`] if the file cannot be opened and
/// [`InspectError::Serialization`] if it is malformed.
pub fn load_frames(path: &Path) -> Result<Vec<LidarFrame>> {
    let frames = frames_from_reader(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), frames = frames.len(), "frames loaded");
    Ok(frames)
}

/// Parses a label object.
///
/// # Errors
///
/// Returns [`InspectError::Serialization`] for malformed JSON or non-numeric
/// ids, and [`InspectError::Frame`] for unknown labels.
///
/// # Example
///
/// ```
/// use lidar_inspect::labels_from_str;
/// use lidar_types::PartitionLabel;
///
/// let labels = labels_from_str(r#"{"2": "TRAIN", "5": "train", "7": "none"}"#).unwrap();
/// assert_eq!(labels[&2], Some(PartitionLabel::Train));
/// assert_eq!(labels[&5], Some(PartitionLabel::Train));
/// assert_eq!(labels[&7], None);
/// ```
pub fn labels_from_str(text: &str) -> Result<LabelMap> {
    let raw: BTreeMap<String, String> = serde_json::from_str(text)?;
    raw.into_iter()
        .map(|(id, label)| -> Result<(FrameId, Option<PartitionLabel>)> {
            let id: FrameId = id
                .trim()
                .parse()
                .map_err(|_| InspectError::Serialization(format!("invalid frame id {id:?}")))?;
            Ok((id, parse_label(&label)?))
        })
        .collect()
}

/// Loads a label file.
///
/// # Errors
///
/// See [`labels_from_str`]; also [`InspectError::Io`] for unreadable files.
pub fn load_labels(path: &Path) -> Result<LabelMap> {
    let labels = labels_from_str(&std::fs::read_to_string(path)?)?;
    info!(path = %path.display(), labels = labels.len(), "labels loaded");
    Ok(labels)
}

/// Writes every frame of `store` to a JSON file, ascending by id.
///
/// # Errors
///
/// Returns [`InspectError::Io`] or [`InspectError::Serialization`] on failure.
pub fn save_frames<S: FrameStore>(store: &S, path: &Path) -> Result<usize> {
    let frames: Vec<&LidarFrame> = store.ids().into_iter().filter_map(|id| store.get(id)).collect();

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &frames)?;
    writer.flush()?;

    info!(path = %path.display(), frames = frames.len(), "frames saved");
    Ok(frames.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lidar_types::{InMemoryFrameStore, PolarSample};

    #[test]
    fn labels_case_insensitive() {
        let labels = labels_from_str(r#"{"1": "Validation", "3": "TEST"}"#).unwrap();
        assert_eq!(labels[&1], Some(PartitionLabel::Validation));
        assert_eq!(labels[&3], Some(PartitionLabel::Test));
    }

    #[test]
    fn labels_reject_unknown() {
        assert!(matches!(
            labels_from_str(r#"{"1": "holdout"}"#),
            Err(InspectError::Frame(_))
        ));
        assert!(matches!(
            labels_from_str(r#"{"one": "train"}"#),
            Err(InspectError::Serialization(_))
        ));
    }

    #[test]
    fn frames_from_json() {
        let json = r#"[
            {"id": 1, "samples": [{"angle": 0.0, "range": 1.0}], "angular_velocity": 0.2},
            {"id": 0, "samples": [], "angle_unit": "degrees", "range_unit": "millimeters"}
        ]"#;
        let frames = frames_from_reader(json.as_bytes()).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].range_unit, lidar_types::LengthUnit::Millimeters);
    }

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.json");
        let frames = vec![
            LidarFrame::new(3, vec![PolarSample::new(0.5, 2.0)]),
            LidarFrame::new(1, vec![PolarSample::new(1.0, 4.0)]),
        ];
        let store = InMemoryFrameStore::new(frames).unwrap();

        assert_eq!(save_frames(&store, &path).unwrap(), 2);
        let reloaded = load_frames(&path).unwrap();
        assert_eq!(reloaded.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(reloaded[1].samples, vec![PolarSample::new(0.5, 2.0)]);
    }
}
