//! Planar translation of polar samples.

use lidar_types::{AngleUnit, PolarSample};
use nalgebra::Vector2;

/// Ranges below this are treated as landing on the sensor origin.
const ORIGIN_EPSILON: f64 = 1e-12;

/// Translates every valid sample by `offset` in the sensor plane.
///
/// Samples are taken to Cartesian coordinates, shifted, and taken back to
/// polar form. Invalid samples ("no return") are copied unchanged. Output
/// angles stay on the same 2π branch as their input, so a zero offset gives
/// back the input samples up to rounding.
///
/// # Example
///
/// ```
/// use lidar_augment::translate_samples;
/// use lidar_types::{AngleUnit, PolarSample};
/// use nalgebra::Vector2;
///
/// let samples = [PolarSample::new(0.0, 2.0)];
/// let moved = translate_samples(&samples, Vector2::new(1.0, 0.0), AngleUnit::Radians);
/// assert!((moved[0].range - 3.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn translate_samples(
    samples: &[PolarSample],
    offset: Vector2<f64>,
    unit: AngleUnit,
) -> Vec<PolarSample> {
    samples
        .iter()
        .map(|sample| translate_sample(*sample, offset, unit))
        .collect()
}

fn translate_sample(sample: PolarSample, offset: Vector2<f64>, unit: AngleUnit) -> PolarSample {
    if !sample.is_valid() {
        return sample;
    }

    let moved = PolarSample::from_cartesian(sample.to_cartesian(unit) + offset, unit);
    if moved.range < ORIGIN_EPSILON {
        // Direction is undefined at the origin.
        return PolarSample::new(sample.angle, moved.range);
    }
    PolarSample::new(
        unwrap_near(moved.angle, sample.angle, unit.full_turn()),
        moved.range,
    )
}

/// Shifts `angle` by whole turns so it lies closest to `reference`.
fn unwrap_near(angle: f64, reference: f64, turn: f64) -> f64 {
    angle + turn * ((reference - angle) / turn).round()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn zero_offset_keeps_angle_branch() {
        // 3π/2 would come back as -π/2 without unwrapping.
        let samples = [PolarSample::new(1.5 * PI, 2.0), PolarSample::new(350.0, 1.0)];
        let out = translate_samples(&samples[..1], Vector2::zeros(), AngleUnit::Radians);
        assert_relative_eq!(out[0].angle, 1.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(out[0].range, 2.0, epsilon = 1e-12);

        let out = translate_samples(&samples[1..], Vector2::zeros(), AngleUnit::Degrees);
        assert_relative_eq!(out[0].angle, 350.0, epsilon = 1e-9);
    }

    #[test]
    fn translation_moves_point() {
        let samples = [PolarSample::new(FRAC_PI_2, 1.0)];
        let out = translate_samples(&samples, Vector2::new(1.0, 0.0), AngleUnit::Radians);
        assert_relative_eq!(out[0].range, 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(out[0].angle, PI / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_samples_pass_through() {
        let samples = [PolarSample::new(0.3, 0.0), PolarSample::new(0.3, f64::INFINITY)];
        let out = translate_samples(&samples, Vector2::new(5.0, 5.0), AngleUnit::Radians);
        assert_eq!(out[0], samples[0]);
        assert_eq!(out[1].angle, samples[1].angle);
        assert!(out[1].range.is_infinite());
    }

    #[test]
    fn point_on_origin_keeps_angle() {
        let samples = [PolarSample::new(0.0, 1.0)];
        let out = translate_samples(&samples, Vector2::new(-1.0, 0.0), AngleUnit::Radians);
        assert!(out[0].range < 1e-9);
        assert_relative_eq!(out[0].angle, 0.0);
    }

    #[test]
    fn unwrap_near_reference() {
        assert_relative_eq!(unwrap_near(-FRAC_PI_2, 1.5 * PI, 2.0 * PI), 1.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(unwrap_near(10.0, 370.0, 360.0), 370.0);
    }
}
