//! # Vector helpers
//!
//! Small extension layer over [`nalgebra::Vector3<f64>`] providing the
//! non-throwing vector primitives the orbit model relies on, plus the fixed
//! ecliptic reference basis.
//!
//! All helpers return defined values for degenerate inputs: normalizing a
//! (near-)zero vector yields the zero vector and angles are computed from a
//! clamped cosine so that roundoff never produces `NaN`.
use nalgebra::{Rotation3, Unit, Vector3};

use crate::constants::{Kilometer, Radian, VECTOR_EPSILON};

/// Reference x-axis of the ecliptic frame (vernal equinox direction).
pub fn ecliptic_right() -> Vector3<f64> {
    Vector3::x()
}

/// Reference y-axis of the ecliptic frame.
pub fn ecliptic_up() -> Vector3<f64> {
    Vector3::y()
}

/// Ecliptic north pole.
pub fn ecliptic_normal() -> Vector3<f64> {
    Vector3::z()
}

/// Extra operations on `Vector3<f64>` used throughout the crate.
pub trait Vector3Ext {
    /// Unit vector with the same direction, or the zero vector when the norm is
    /// below [`VECTOR_EPSILON`].
    fn normalized_or_zero(&self) -> Vector3<f64>;

    /// Unsigned angle between two vectors, in `[0, π]`.
    fn angle_to(&self, other: &Vector3<f64>) -> Radian;

    /// Euclidean distance between two points.
    fn distance_to(&self, other: &Vector3<f64>) -> Kilometer;

    /// Right-handed rotation of `self` by `angle` around `axis`.
    ///
    /// A zero axis leaves the vector unchanged.
    fn rotated_about(&self, axis: &Vector3<f64>, angle: Radian) -> Vector3<f64>;
}

impl Vector3Ext for Vector3<f64> {
    fn normalized_or_zero(&self) -> Vector3<f64> {
        let norm = self.norm();
        if norm > VECTOR_EPSILON {
            self / norm
        } else {
            Vector3::zeros()
        }
    }

    fn angle_to(&self, other: &Vector3<f64>) -> Radian {
        let cos = self
            .normalized_or_zero()
            .dot(&other.normalized_or_zero())
            .clamp(-1.0, 1.0);
        cos.acos()
    }

    fn distance_to(&self, other: &Vector3<f64>) -> Kilometer {
        (self - other).norm()
    }

    fn rotated_about(&self, axis: &Vector3<f64>, angle: Radian) -> Vector3<f64> {
        match Unit::try_new(*axis, VECTOR_EPSILON) {
            Some(unit) => Rotation3::from_axis_angle(&unit, angle) * self,
            None => *self,
        }
    }
}

/// Normalize `candidate` and accept it only if the result is a genuine unit vector.
///
/// Returns `None` when the squared norm of the normalized vector falls below
/// `threshold`, i.e. when the input was too short to carry a direction. Callers
/// substitute their own fallback direction in that case.
///
/// Arguments
/// -----------------
/// * `candidate`: the raw (typically cross-product) vector.
/// * `threshold`: squared-norm acceptance threshold, usually
///   [`KeplerParams::degenerate_basis_threshold`](crate::kepler_params::KeplerParams).
pub fn robust_unit(candidate: &Vector3<f64>, threshold: f64) -> Option<Vector3<f64>> {
    let unit = candidate.normalized_or_zero();
    if unit.norm_squared() < threshold {
        None
    } else {
        Some(unit)
    }
}

#[cfg(test)]
mod vector_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn normalizing_zero_gives_zero() {
        assert_eq!(Vector3::<f64>::zeros().normalized_or_zero(), Vector3::zeros());
        let v = Vector3::new(3.0, 0.0, 4.0).normalized_or_zero();
        assert_abs_diff_eq!(v.norm(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn angle_is_clamped() {
        let a = Vector3::new(1.0, 1e-17, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        assert!(!a.angle_to(&b).is_nan());
        assert_abs_diff_eq!(a.angle_to(&(-b)), PI, epsilon = 1e-12);
        assert_abs_diff_eq!(ecliptic_right().angle_to(&ecliptic_up()), FRAC_PI_2);
    }

    #[test]
    fn rotation_is_right_handed() {
        let r = ecliptic_right().rotated_about(&ecliptic_normal(), FRAC_PI_2);
        assert_abs_diff_eq!(r, ecliptic_up(), epsilon = 1e-15);
        let same = ecliptic_right().rotated_about(&Vector3::zeros(), 1.0);
        assert_eq!(same, ecliptic_right());
    }

    #[test]
    fn robust_unit_rejects_degenerate_input() {
        assert!(robust_unit(&Vector3::zeros(), 0.99).is_none());
        let unit = robust_unit(&Vector3::new(0.0, 2.0, 0.0), 0.99).unwrap();
        assert_abs_diff_eq!(unit, ecliptic_up());
        assert_abs_diff_eq!(
            Vector3::new(1.0, 2.0, 2.0).distance_to(&Vector3::zeros()),
            3.0
        );
    }
}
