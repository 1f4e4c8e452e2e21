use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::attractor::Attractor;
use crate::constants::{Degree, Kilometer, Radian, DEGRAD, RADEG};
use crate::kepler::{signed_principal_angle, ConicRegime};
use crate::kepler_params::KeplerParams;
use crate::orbit::Orbit;
use crate::orbit_errors::OrbitError;
use crate::vector::{ecliptic_normal, ecliptic_right, Vector3Ext};

/// # Classical orbital elements
///
/// Shape and orientation of a conic in the ecliptic frame. The epoch is not part of
/// the element set: the resulting orbit has its periapsis passage at `t = 0` until
/// [`Orbit::set_periapsis_time_with_mean_anomaly`] moves it.
///
/// Units & conventions
/// --------------------
/// - Distances in **km**; angles in **radians**.
/// - For a parabola (`e = 1`) the `semi_major_axis` field carries the periapsis
///   distance `q`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassicalElements {
    /// Eccentricity `e` (≥ 0).
    pub eccentricity: f64,

    /// Semi-major axis `a` (km, > 0), or periapsis distance `q` when `e = 1`.
    pub semi_major_axis: Kilometer,

    /// Inclination `i` (rad).
    pub inclination: Radian,

    /// Argument of periapsis `ω` (rad).
    pub argument_of_periapsis: Radian,

    /// Longitude of the ascending node `Ω` (rad).
    pub ascending_node: Radian,
}

impl ClassicalElements {
    /// Equatorial circular orbit of radius `radius`.
    pub fn circular(radius: Kilometer) -> Self {
        ClassicalElements {
            eccentricity: 0.0,
            semi_major_axis: radius,
            ..Default::default()
        }
    }

    /// Build elements from angles given in degrees.
    pub fn from_degrees(
        eccentricity: f64,
        semi_major_axis: Kilometer,
        inclination: Degree,
        argument_of_periapsis: Degree,
        ascending_node: Degree,
    ) -> Self {
        ClassicalElements {
            eccentricity,
            semi_major_axis,
            inclination: inclination * RADEG,
            argument_of_periapsis: argument_of_periapsis * RADEG,
            ascending_node: ascending_node * RADEG,
        }
    }

    fn validate(&self) -> Result<(), OrbitError> {
        if !(self.eccentricity.is_finite() && self.eccentricity >= 0.0) {
            return Err(OrbitError::InvalidOrbitState(format!(
                "eccentricity must be finite and >= 0 (got {})",
                self.eccentricity
            )));
        }
        if !(self.semi_major_axis.is_finite() && self.semi_major_axis > 0.0) {
            return Err(OrbitError::InvalidOrbitState(format!(
                "semi-major axis must be finite and > 0 (got {})",
                self.semi_major_axis
            )));
        }
        if ![
            self.inclination,
            self.argument_of_periapsis,
            self.ascending_node,
        ]
        .iter()
        .all(|a| a.is_finite())
        {
            return Err(OrbitError::InvalidOrbitState(
                "orientation angles must be finite".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ClassicalElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classical Elements")?;
        writeln!(f, "------------------------------------------------")?;
        writeln!(
            f,
            "  e   (eccentricity)            = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  a   (semi-major axis)         = {:.3} km",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  i   (inclination)             = {:.6} rad ({:.6}°)",
            self.inclination,
            self.inclination * DEGRAD
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis)   = {:.6} rad ({:.6}°)",
            self.argument_of_periapsis,
            self.argument_of_periapsis * DEGRAD
        )?;
        writeln!(
            f,
            "  Ω   (ascending node)          = {:.6} rad ({:.6}°)",
            self.ascending_node,
            self.ascending_node * DEGRAD
        )
    }
}

impl Orbit {
    /// Build an orbit from classical elements with the default [`KeplerParams`].
    pub fn from_elements(
        elements: &ClassicalElements,
        attractor: Arc<Attractor>,
    ) -> Result<Self, OrbitError> {
        Self::from_elements_with_params(elements, attractor, KeplerParams::default())
    }

    /// Build an orbit from classical elements.
    ///
    /// The orbital-plane basis is obtained by three right-handed rotations of the
    /// ecliptic axes: `x̂` by `Ω` about `ẑ` gives the ascending node, `ẑ` by `i` about
    /// the node gives the orbit normal, and the node by `ω` about the normal gives the
    /// periapsis direction.
    ///
    /// Arguments
    /// -----------------
    /// * `elements`: the element set; angles are normalized into `(−π, π]`.
    /// * `attractor`: the central body, shared.
    /// * `params`: solver configuration carried by the orbit.
    ///
    /// Return
    /// ----------
    /// * The orbit with `periapsis_time = 0`, or [`OrbitError::InvalidOrbitState`] for
    ///   a negative eccentricity, a non-positive semi-major axis or non-finite angles.
    pub fn from_elements_with_params(
        elements: &ClassicalElements,
        attractor: Arc<Attractor>,
        params: KeplerParams,
    ) -> Result<Self, OrbitError> {
        elements.validate()?;

        let e = elements.eccentricity;
        let a = elements.semi_major_axis;
        let inclination = signed_principal_angle(elements.inclination);
        let argument_of_periapsis = signed_principal_angle(elements.argument_of_periapsis);
        let ascending_node = signed_principal_angle(elements.ascending_node);

        let node = ecliptic_right().rotated_about(&ecliptic_normal(), ascending_node);
        let normal = ecliptic_normal().rotated_about(&node, inclination);
        let periapsis = node.rotated_about(&normal, argument_of_periapsis);
        let minor_direction = periapsis.cross(&normal);

        let (major_length, minor_length, periapsis_distance) =
            match ConicRegime::from_eccentricity(e) {
                ConicRegime::Elliptical => (a, a * (1.0 - e * e).sqrt(), a * (1.0 - e)),
                ConicRegime::Hyperbolic => (a, a * (e * e - 1.0).sqrt(), a * (e - 1.0)),
                ConicRegime::Parabolic => (1.0, 1.0, a),
            };

        Orbit::from_parts(
            periapsis * major_length,
            minor_direction * minor_length,
            e,
            periapsis_distance,
            0.0,
            attractor,
            params,
        )
    }
}

#[cfg(test)]
mod elements_test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::Vector3;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn earth() -> Arc<Attractor> {
        Arc::new(Attractor::earth())
    }

    #[test]
    fn equatorial_orbit_basis() {
        let orbit = Orbit::from_elements(
            &ClassicalElements {
                eccentricity: 0.1,
                semi_major_axis: 10_000.0,
                ..Default::default()
            },
            earth(),
        )
        .unwrap();
        assert_abs_diff_eq!(orbit.periapsis_direction(), Vector3::x(), epsilon = 1e-15);
        assert_abs_diff_eq!(orbit.orbit_normal(), Vector3::z(), epsilon = 1e-15);
        assert_abs_diff_eq!(orbit.minor_axis_direction(), -Vector3::y(), epsilon = 1e-15);
        assert_eq!(orbit.periapsis_time(), 0.0);
    }

    #[test]
    fn inclined_orbit_basis() {
        let orbit = Orbit::from_elements(
            &ClassicalElements {
                eccentricity: 0.2,
                semi_major_axis: 10_000.0,
                inclination: FRAC_PI_2,
                argument_of_periapsis: FRAC_PI_2,
                ascending_node: FRAC_PI_2,
            },
            earth(),
        )
        .unwrap();
        // node along +y, normal tipped from +z onto +x, periapsis at +z
        assert_abs_diff_eq!(orbit.orbit_normal(), Vector3::x(), epsilon = 1e-12);
        assert_abs_diff_eq!(orbit.periapsis_direction(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn angles_are_normalized() {
        let base = ClassicalElements {
            eccentricity: 0.2,
            semi_major_axis: 9_000.0,
            inclination: 0.3,
            argument_of_periapsis: 1.0,
            ascending_node: 2.0,
        };
        let wrapped = ClassicalElements {
            inclination: 0.3 + 2.0 * PI,
            argument_of_periapsis: 1.0 - 4.0 * PI,
            ..base
        };
        let a = Orbit::from_elements(&base, earth()).unwrap();
        let b = Orbit::from_elements(&wrapped, earth()).unwrap();
        assert_abs_diff_eq!(
            a.semi_major_axis_vector(),
            b.semi_major_axis_vector(),
            epsilon = 1e-8
        );
    }

    #[test]
    fn parabolic_elements_use_periapsis_distance() {
        let orbit = Orbit::from_elements(
            &ClassicalElements {
                eccentricity: 1.0,
                semi_major_axis: 7_000.0,
                ..Default::default()
            },
            earth(),
        )
        .unwrap();
        assert_eq!(orbit.periapsis_distance(), 7_000.0);
        assert_eq!(orbit.semi_major_axis(), f64::INFINITY);
        assert_relative_eq!(
            orbit.position_at_true_anomaly(0.0).norm(),
            7_000.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            orbit.position_at_true_anomaly(FRAC_PI_2).norm(),
            14_000.0,
            max_relative = 1e-12
        );
        // escape speed at periapsis
        let v = orbit.velocity_at_true_anomaly(0.0).norm();
        assert_relative_eq!(
            v,
            (2.0 * orbit.gravitational_parameter() / 7_000.0).sqrt(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn hyperbolic_periapsis() {
        let orbit = Orbit::from_elements(
            &ClassicalElements {
                eccentricity: 2.0,
                semi_major_axis: 8_000.0,
                ..Default::default()
            },
            earth(),
        )
        .unwrap();
        assert_relative_eq!(orbit.periapsis_distance(), 8_000.0, max_relative = 1e-12);
        assert_relative_eq!(
            orbit.position_at_eccentric_anomaly(0.0).norm(),
            8_000.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn invalid_elements_fail_fast() {
        for bad in [
            ClassicalElements {
                eccentricity: -0.1,
                semi_major_axis: 7_000.0,
                ..Default::default()
            },
            ClassicalElements {
                eccentricity: 0.1,
                semi_major_axis: 0.0,
                ..Default::default()
            },
            ClassicalElements {
                eccentricity: 0.1,
                semi_major_axis: 7_000.0,
                inclination: f64::NAN,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                Orbit::from_elements(&bad, earth()),
                Err(OrbitError::InvalidOrbitState(_))
            ));
        }
    }

    #[test]
    fn degrees_constructor_and_display() {
        let el = ClassicalElements::from_degrees(0.0167, 1.49598e8, 0.0, 114.21, 0.0);
        assert_abs_diff_eq!(el.argument_of_periapsis, 114.21 * RADEG);
        let s = format!("{el}");
        assert!(s.contains("114.21"), "{s}");
    }
}
