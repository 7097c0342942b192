//! Command surface over navigation and augmentation.
//!
//! A UI layer turns user intents into [`Command`]s and maps each
//! [`Outcome`] to control state and status text. Periodic refreshes read
//! [`Session::status`], which never mutates anything.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use lidar_augment::{AugmentError, AugmentationEngine, MoveRequest};
use lidar_nav::{ButtonPath, LabelMap, NavigationController, PartitionSummary};
use lidar_types::{ErrorKind, FrameId, FrameStore, Heading, LengthUnit, NavDirection, View};
use tracing::{debug, warn};

use crate::config::InspectConfig;
use crate::dataset::save_frames;
use crate::error::{InspectError, Result};

/// One user intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Browse another view.
    SwitchView(View),
    /// Step back in the active view.
    Prev,
    /// Step forward in the active view.
    Next,
    /// Move the sensor origin of the shown frame.
    ///
    /// Missing step or unit fall back to the session defaults. Fails when
    /// the active view shows no frame.
    Move {
        /// Direction of the move.
        heading: Heading,
        /// Distance, if given.
        step: Option<f64>,
        /// Unit of `step`, if given.
        unit: Option<LengthUnit>,
    },
    /// Undo every move on the shown frame.
    Revert,
    /// Accept all modifications (saving first if an output is set).
    Commit,
    /// Report status only.
    Status,
}

impl FromStr for Command {
    type Err = InspectError;

    /// Parses `view <name>`, `prev`, `next`, `move <heading> [step] [unit]`,
    /// `revert`, `commit` and `status`, case-insensitively.
    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(InspectError::invalid_command("empty command"));
        };
        let args: Vec<&str> = words.collect();

        let command = match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("view" | "switch", [name]) => Self::SwitchView(name.parse()?),
            ("prev" | "p", []) => Self::Prev,
            ("next" | "n", []) => Self::Next,
            ("move" | "m", [heading, rest @ ..]) if rest.len() <= 2 => {
                let step = rest
                    .first()
                    .map(|s| {
                        s.parse::<f64>()
                            .map_err(|_| InspectError::invalid_command(format!("bad step {s:?}")))
                    })
                    .transpose()?;
                let unit = rest.get(1).map(|u| u.parse::<LengthUnit>()).transpose()?;
                Self::Move {
                    heading: heading.parse()?,
                    step,
                    unit,
                }
            }
            ("revert" | "undo", []) => Self::Revert,
            ("commit" | "save", []) => Self::Commit,
            ("status", []) => Self::Status,
            _ => return Err(InspectError::invalid_command(line.trim())),
        };
        Ok(command)
    }
}

/// Result of executing a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command took effect.
    Applied,
    /// A boundary was reached; nothing changed.
    Blocked,
    /// The command was rejected.
    Failed {
        /// Classification for control state.
        kind: ErrorKind,
        /// Message for the operator.
        message: String,
    },
}

impl Outcome {
    fn failed(err: &InspectError) -> Self {
        Self::Failed {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("ok"),
            Self::Blocked => f.write_str("blocked"),
            Self::Failed { message, .. } => write!(f, "error: {message}"),
        }
    }
}

/// Read-only snapshot of what a UI needs to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    /// Active view.
    pub view: View,
    /// Frame the active view points at.
    pub frame: Option<FrameId>,
    /// Prev control enabled.
    pub can_prev: bool,
    /// Next control enabled.
    pub can_next: bool,
    /// Rule the control state was derived under.
    pub path: ButtonPath,
    /// Whether the shown frame has unsaved modifications.
    pub modified: bool,
    /// Number of frames with unsaved modifications.
    pub modified_frames: usize,
    /// Partition sizes.
    pub summary: PartitionSummary,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |b: bool| if b { "on" } else { "off" };
        match self.frame {
            Some(id) => write!(f, "view={} frame={id}", self.view)?,
            None => write!(f, "view={} frame=-", self.view)?,
        }
        write!(
            f,
            " prev={} next={} modified={} ({} unsaved)",
            on_off(self.can_prev),
            on_off(self.can_next),
            if self.modified { "yes" } else { "no" },
            self.modified_frames
        )
    }
}

/// A frame store with its navigation and augmentation state.
///
/// # Example
///
/// ```
/// use lidar_inspect::{InspectConfig, Outcome, Session};
/// use lidar_nav::LabelMap;
/// use lidar_types::{InMemoryFrameStore, LidarFrame};
///
/// let frames = (0..3).map(|id| LidarFrame::new(id, Vec::new())).collect();
/// let store = InMemoryFrameStore::new(frames).unwrap();
/// let mut session = Session::new(store, &LabelMap::new(), &InspectConfig::default()).unwrap();
///
/// assert_eq!(session.execute_line("prev"), Outcome::Blocked);
/// assert_eq!(session.execute_line("NEXT"), Outcome::Applied);
/// assert_eq!(session.status().frame, Some(1));
/// ```
#[derive(Debug)]
pub struct Session<S: FrameStore> {
    store: S,
    nav: NavigationController,
    engine: AugmentationEngine,
    default_step: f64,
    default_unit: LengthUnit,
    output: Option<PathBuf>,
}

impl<S: FrameStore> Session<S> {
    /// Builds a session over `store`.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Config`] for an invalid config and
    /// [`InspectError::Nav`] if the store cannot be positioned.
    pub fn new(mut store: S, labels: &LabelMap, config: &InspectConfig) -> Result<Self> {
        config.validate()?;
        let nav = NavigationController::load(&mut store, labels)?;
        Ok(Self {
            store,
            nav,
            engine: AugmentationEngine::new(),
            default_step: config.default_step,
            default_unit: config.default_unit,
            output: None,
        })
    }

    /// Sets the file `commit` saves frames to.
    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// The frame store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The navigation controller.
    #[must_use]
    pub const fn navigator(&self) -> &NavigationController {
        &self.nav
    }

    /// The augmentation engine.
    #[must_use]
    pub const fn engine(&self) -> &AugmentationEngine {
        &self.engine
    }

    /// Parses and executes one command line.
    pub fn execute_line(&mut self, line: &str) -> Outcome {
        match line.parse::<Command>() {
            Ok(command) => self.execute(command),
            Err(err) => {
                debug!(%err, "command rejected");
                Outcome::failed(&err)
            }
        }
    }

    /// Executes one command.
    pub fn execute(&mut self, command: Command) -> Outcome {
        match self.apply(command) {
            Ok(true) => Outcome::Applied,
            Ok(false) => Outcome::Blocked,
            Err(err) => {
                match err.kind() {
                    ErrorKind::InvalidInput | ErrorKind::Blocked => {
                        debug!(%err, ?command, "command rejected");
                    }
                    ErrorKind::NotFound | ErrorKind::InternalInconsistency => {
                        warn!(%err, ?command, "command failed");
                    }
                }
                Outcome::failed(&err)
            }
        }
    }

    /// Replaces the partition labels, as after an external split.
    ///
    /// # Errors
    ///
    /// Returns [`InspectError::Nav`] if the store cannot be repositioned.
    pub fn apply_labels(&mut self, labels: &LabelMap) -> Result<()> {
        self.nav.apply_labels(&mut self.store, labels)?;
        Ok(())
    }

    /// Current view, frame and control state. Has no side effects.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        let buttons = self.nav.buttons();
        let frame = self.nav.current_id();
        SessionStatus {
            view: self.nav.active_view(),
            frame,
            can_prev: buttons.prev,
            can_next: buttons.next,
            path: buttons.path,
            modified: frame.is_some_and(|id| self.engine.is_modified(id)),
            modified_frames: self.engine.modified_ids().len(),
            summary: self.nav.index().summary(),
        }
    }

    /// Frame shown in the active view, which augmentation may touch.
    ///
    /// An empty view leaves the store on another view's frame; that frame is
    /// not shown and must not be edited.
    fn displayed_frame(&self) -> Result<FrameId> {
        match (self.nav.current_id(), self.store.current()) {
            (Some(shown), Some(frame)) if frame.id == shown => Ok(shown),
            _ => Err(AugmentError::NoActiveFrame.into()),
        }
    }

    fn apply(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::SwitchView(view) => {
                self.nav.switch_view(&mut self.store, view)?;
                Ok(true)
            }
            Command::Prev => Ok(self.nav.advance(&mut self.store, NavDirection::Prev)?),
            Command::Next => Ok(self.nav.advance(&mut self.store, NavDirection::Next)?),
            Command::Move {
                heading,
                step,
                unit,
            } => {
                self.displayed_frame()?;
                let request = MoveRequest::new(
                    heading,
                    step.unwrap_or(self.default_step),
                    unit.unwrap_or(self.default_unit),
                );
                self.engine.move_origin(&mut self.store, &request)?;
                Ok(true)
            }
            Command::Revert => {
                let id = self.displayed_frame()?;
                self.engine.revert(&mut self.store, id)?;
                Ok(true)
            }
            Command::Commit => {
                if let Some(path) = &self.output {
                    save_frames(&self.store, path)?;
                }
                self.engine.commit_all();
                Ok(true)
            }
            Command::Status => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_navigation_commands() {
        assert_eq!("view TRAIN".parse::<Command>().unwrap(), Command::SwitchView(View::Train));
        assert_eq!("Prev".parse::<Command>().unwrap(), Command::Prev);
        assert_eq!(" next ".parse::<Command>().unwrap(), Command::Next);
        assert_eq!("status".parse::<Command>().unwrap(), Command::Status);
    }

    #[test]
    fn parse_move_commands() {
        assert_eq!(
            "move n 0.5 mm".parse::<Command>().unwrap(),
            Command::Move {
                heading: Heading::North,
                step: Some(0.5),
                unit: Some(LengthUnit::Millimeters),
            }
        );
        assert_eq!(
            "MOVE west".parse::<Command>().unwrap(),
            Command::Move {
                heading: Heading::West,
                step: None,
                unit: None,
            }
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        for line in ["", "jump 3", "view holdout", "move up", "move n x", "move n 1 km", "next 2"] {
            let err = line.parse::<Command>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "{line:?}");
        }
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::Applied.to_string(), "ok");
        assert_eq!(Outcome::Blocked.to_string(), "blocked");
        let failed = Outcome::Failed {
            kind: ErrorKind::InvalidInput,
            message: "bad".into(),
        };
        assert_eq!(failed.to_string(), "error: bad");
    }
}
