//! Recorded `LiDAR` frames and their polar samples.

use std::fmt;
use std::str::FromStr;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::LidarError;

/// Stable frame identifier, assigned at load time and never reused.
pub type FrameId = u64;

/// Unit of the angle component of a [`PolarSample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Angles in radians.
    #[default]
    Radians,
    /// Angles in degrees.
    Degrees,
}

impl AngleUnit {
    /// Converts an angle in this unit to radians.
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Radians => angle,
            Self::Degrees => angle.to_radians(),
        }
    }

    /// Converts an angle in radians to this unit.
    #[must_use]
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            Self::Radians => radians,
            Self::Degrees => radians.to_degrees(),
        }
    }

    /// Length of a full turn in this unit.
    #[must_use]
    pub fn full_turn(self) -> f64 {
        match self {
            Self::Radians => std::f64::consts::TAU,
            Self::Degrees => 360.0,
        }
    }
}

/// Unit of range values and of augmentation steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Meters.
    #[default]
    Meters,
    /// Millimeters.
    Millimeters,
}

impl LengthUnit {
    /// Millimeters per meter.
    pub const MM_PER_M: f64 = 1000.0;

    /// Converts `value` expressed in `self` into `to`.
    ///
    /// # Example
    ///
    /// ```
    /// use lidar_types::LengthUnit;
    ///
    /// let mm = LengthUnit::Meters.convert(0.25, LengthUnit::Millimeters);
    /// assert!((mm - 250.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn convert(self, value: f64, to: Self) -> f64 {
        match (self, to) {
            (Self::Meters, Self::Millimeters) => value * Self::MM_PER_M,
            (Self::Millimeters, Self::Meters) => value / Self::MM_PER_M,
            _ => value,
        }
    }

    /// Short symbol (`m` or `mm`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Meters => "m",
            Self::Millimeters => "mm",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = LidarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(Self::Meters),
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => {
                Ok(Self::Millimeters)
            }
            _ => Err(LidarError::unknown_unit(s)),
        }
    }
}

/// A single polar range reading.
///
/// The angle unit is a property of the owning [`LidarFrame`].
///
/// # Example
///
/// ```
/// use lidar_types::{AngleUnit, PolarSample};
///
/// let sample = PolarSample::new(std::f64::consts::FRAC_PI_2, 2.0);
/// let p = sample.to_cartesian(AngleUnit::Radians);
/// assert!(p.x.abs() < 1e-12);
/// assert!((p.y - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarSample {
    /// Beam angle.
    pub angle: f64,
    /// Measured range, in the frame's range unit.
    pub range: f64,
}

impl PolarSample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(angle: f64, range: f64) -> Self {
        Self { angle, range }
    }

    /// Whether the sample is a real return (finite angle, finite positive range).
    ///
    /// Zero or non-finite ranges are "no return" markers.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.angle.is_finite() && self.range.is_finite() && self.range > 0.0
    }

    /// Position relative to the sensor origin.
    #[must_use]
    pub fn to_cartesian(&self, unit: AngleUnit) -> Point2<f64> {
        let (sin, cos) = unit.to_radians(self.angle).sin_cos();
        Point2::new(self.range * cos, self.range * sin)
    }

    /// Builds a sample from a position relative to the sensor origin.
    ///
    /// The angle is in `(-π, π]` (or the degree equivalent).
    #[must_use]
    pub fn from_cartesian(point: Point2<f64>, unit: AngleUnit) -> Self {
        Self {
            angle: unit.from_radians(point.y.atan2(point.x)),
            range: point.coords.norm(),
        }
    }
}

/// One recorded `LiDAR` frame.
///
/// # Example
///
/// ```
/// use lidar_types::{LidarFrame, PolarSample};
///
/// let frame = LidarFrame::new(7, vec![PolarSample::new(0.0, 1.5)]);
/// assert_eq!(frame.id, 7);
/// assert_eq!(frame.sample_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LidarFrame {
    /// Global frame id.
    pub id: FrameId,

    /// Capture time in seconds.
    #[serde(default)]
    pub timestamp: f64,

    /// Polar samples of the sweep.
    pub samples: Vec<PolarSample>,

    /// Angular velocity of the platform. Not a spatial quantity.
    #[serde(default)]
    pub angular_velocity: f64,

    /// Unit of every sample angle.
    #[serde(default)]
    pub angle_unit: AngleUnit,

    /// Unit of every sample range.
    #[serde(default)]
    pub range_unit: LengthUnit,
}

impl LidarFrame {
    /// Creates a frame in radians and meters with zero timestamp and velocity.
    #[must_use]
    pub const fn new(id: FrameId, samples: Vec<PolarSample>) -> Self {
        Self {
            id,
            timestamp: 0.0,
            samples,
            angular_velocity: 0.0,
            angle_unit: AngleUnit::Radians,
            range_unit: LengthUnit::Meters,
        }
    }

    /// Sets the capture time.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the angular velocity.
    #[must_use]
    pub const fn with_angular_velocity(mut self, angular_velocity: f64) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Sets the sample units.
    #[must_use]
    pub const fn with_units(mut self, angle_unit: AngleUnit, range_unit: LengthUnit) -> Self {
        self.angle_unit = angle_unit;
        self.range_unit = range_unit;
        self
    }

    /// Number of samples in the sweep.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of samples that carry a real return.
    #[must_use]
    pub fn valid_sample_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_valid()).count()
    }
}
