use std::sync::Arc;

use log::{debug, warn};
use nalgebra::Vector3;

use crate::attractor::Attractor;
use crate::constants::{Second, DPI, VECTOR_EPSILON};
use crate::kepler::{self, ConicRegime};
use crate::kepler_params::KeplerParams;
use crate::orbit::Orbit;
use crate::orbit_errors::OrbitError;
use crate::vector::{ecliptic_normal, ecliptic_up, robust_unit, Vector3Ext};

impl Orbit {
    /// Determine the orbit passing through `position` with `velocity` at `at_time`,
    /// using the default [`KeplerParams`].
    pub fn from_state_vector(
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        attractor: Arc<Attractor>,
        at_time: Second,
    ) -> Result<Self, OrbitError> {
        Self::from_state_vector_with_params(
            position,
            velocity,
            attractor,
            at_time,
            KeplerParams::default(),
        )
    }

    /// Determine the orbit passing through `position` with `velocity` at `at_time`.
    ///
    /// Algorithm
    /// -----------------
    /// 1. `h = r × v`; the eccentricity vector is `v × h / μ − r̂`.
    /// 2. A near-zero `h` (radial trajectory) falls back to the normal `r × ŷ` and a
    ///    zero eccentricity vector. A near-zero `h × (−e)` (circular orbit) falls back
    ///    to a minor axis along `n̂ × r`.
    /// 3. Axis lengths follow from the focal parameter `p = |h|²/μ` and the
    ///    compression factor `|1 − e²|`.
    /// 4. The signed true anomaly of `r` is converted to a mean anomaly, from which the
    ///    periapsis time is backed out.
    ///
    /// Arguments
    /// -----------------
    /// * `position`, `velocity`: focus-relative state in km and km/s.
    /// * `attractor`: the central body, shared.
    /// * `at_time`: time of the sample in seconds.
    /// * `params`: solver configuration (including the degenerate-basis threshold).
    ///
    /// Return
    /// ----------
    /// * The orbit, or [`OrbitError::InvalidOrbitState`] for non-finite input, a
    ///   position at the focus, or a non-finite derived periapsis time.
    pub fn from_state_vector_with_params(
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        attractor: Arc<Attractor>,
        at_time: Second,
        params: KeplerParams,
    ) -> Result<Self, OrbitError> {
        if !(position.iter().all(|c| c.is_finite()) && velocity.iter().all(|c| c.is_finite())) {
            return Err(OrbitError::InvalidOrbitState(format!(
                "non-finite state vector r = {position:?}, v = {velocity:?}"
            )));
        }
        if !at_time.is_finite() {
            return Err(OrbitError::InvalidOrbitState(format!(
                "non-finite sample time {at_time}"
            )));
        }
        let radius = position.norm();
        if radius <= VECTOR_EPSILON {
            return Err(OrbitError::InvalidOrbitState(
                "position coincides with the attractor".into(),
            ));
        }

        let threshold = params.degenerate_basis_threshold;
        let mu = attractor.gravitational_parameter();
        let angular_momentum = position.cross(velocity);

        let (orbit_normal, eccentricity_vector) = match robust_unit(&angular_momentum, threshold) {
            Some(normal) => (normal, velocity.cross(&angular_momentum) / mu - position / radius),
            None => {
                debug!("radial trajectory: falling back to an ecliptic-derived orbit normal");
                let normal =
                    robust_unit(&position.cross(&ecliptic_up()), threshold).unwrap_or_else(ecliptic_normal);
                (normal, Vector3::zeros())
            }
        };
        let eccentricity = eccentricity_vector.norm();

        let minor_direction = match robust_unit(&angular_momentum.cross(&-eccentricity_vector), threshold) {
            Some(minor) => minor,
            None => {
                debug!("circular orbit: anchoring the minor axis on the sampled position");
                orbit_normal.cross(position).normalized_or_zero()
            }
        };
        let major_direction = orbit_normal.cross(&minor_direction).normalized_or_zero();

        let focal_parameter = angular_momentum.norm_squared() / mu;
        let regime = ConicRegime::from_eccentricity(eccentricity);
        let (major_length, minor_length, periapsis_distance) = match regime {
            ConicRegime::Elliptical => {
                let compression = 1.0 - eccentricity * eccentricity;
                let a = focal_parameter / compression;
                (a, a * compression.sqrt(), a * (1.0 - eccentricity))
            }
            ConicRegime::Hyperbolic => {
                let compression = eccentricity * eccentricity - 1.0;
                let a = focal_parameter / compression;
                (a, a * compression.sqrt(), a * (eccentricity - 1.0))
            }
            ConicRegime::Parabolic => {
                warn!("state vector lies exactly on a parabolic trajectory");
                (1.0, 1.0, 0.5 * focal_parameter)
            }
        };

        let mut true_anomaly = position.angle_to(&major_direction);
        if position.cross(&-major_direction).dot(&orbit_normal) < 0.0 {
            true_anomaly = match regime {
                ConicRegime::Elliptical => DPI - true_anomaly,
                ConicRegime::Parabolic | ConicRegime::Hyperbolic => -true_anomaly,
            };
        }

        let mut orbit = Orbit::from_parts(
            major_direction * major_length,
            minor_direction * minor_length,
            eccentricity,
            periapsis_distance,
            0.0,
            attractor,
            params,
        )?;

        let eccentric_anomaly = kepler::eccentric_from_true(true_anomaly, eccentricity);
        let mean_anomaly = kepler::mean_from_eccentric(eccentric_anomaly, eccentricity);
        orbit.set_periapsis_time_with_mean_anomaly(mean_anomaly, at_time)?;
        Ok(orbit)
    }

    /// Re-derive this orbit in place from a new state vector, keeping its attractor
    /// and parameters. On error the orbit is left untouched.
    pub fn set_by_state_vector(
        &mut self,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        at_time: Second,
    ) -> Result<(), OrbitError> {
        *self = Orbit::from_state_vector_with_params(
            position,
            velocity,
            Arc::clone(&self.attractor),
            at_time,
            self.params,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod state_vector_test {
    use super::*;
    use crate::orbit::elements::ClassicalElements;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn earth() -> Arc<Attractor> {
        Arc::new(Attractor::earth())
    }

    #[test]
    fn circular_state_vector() {
        let earth = earth();
        let r = 6_798.0;
        let v = (earth.gravitational_parameter() / r).sqrt();
        let orbit = Orbit::from_state_vector(
            &Vector3::new(r, 0.0, 0.0),
            &Vector3::new(0.0, v, 0.0),
            earth,
            0.0,
        )
        .unwrap();
        assert!(orbit.eccentricity() < 1e-12);
        assert_relative_eq!(orbit.semi_major_axis(), r, max_relative = 1e-12);
        assert_abs_diff_eq!(orbit.orbit_normal(), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn elliptical_state_round_trip() {
        let mut source = Orbit::from_elements(
            &ClassicalElements {
                eccentricity: 0.4,
                semi_major_axis: 15_000.0,
                inclination: 0.5,
                argument_of_periapsis: -1.2,
                ascending_node: 2.2,
            },
            earth(),
        )
        .unwrap();
        source.set_periapsis_time(-300.0).unwrap();

        for t in [0.0, 2_000.0, 9_000.0, 15_000.0] {
            let (r, v) = source.state_at_time(t).unwrap();
            let rebuilt = Orbit::from_state_vector(&r, &v, earth(), t).unwrap();
            assert_relative_eq!(rebuilt.eccentricity(), 0.4, max_relative = 1e-10);
            assert_relative_eq!(rebuilt.semi_major_axis(), 15_000.0, max_relative = 1e-10);
            assert_abs_diff_eq!(
                rebuilt.periapsis_direction(),
                source.periapsis_direction(),
                epsilon = 1e-9
            );
            let (r2, v2) = rebuilt.state_at_time(t).unwrap();
            assert_abs_diff_eq!(r2, r, epsilon = 1e-6);
            assert_abs_diff_eq!(v2, v, epsilon = 1e-9);
        }
    }

    #[test]
    fn hyperbolic_state_round_trip_before_periapsis() {
        let source = Orbit::from_elements(
            &ClassicalElements {
                eccentricity: 1.8,
                semi_major_axis: 20_000.0,
                inclination: 0.2,
                argument_of_periapsis: 0.4,
                ascending_node: 0.1,
            },
            earth(),
        )
        .unwrap();
        let t = -1_500.0;
        let (r, v) = source.state_at_time(t).unwrap();
        let rebuilt = Orbit::from_state_vector(&r, &v, earth(), t).unwrap();
        assert_relative_eq!(rebuilt.eccentricity(), 1.8, max_relative = 1e-10);
        assert_abs_diff_eq!(rebuilt.periapsis_time(), 0.0, epsilon = 1e-6);
        assert!(rebuilt.true_anomaly_at_time(t).unwrap() < 0.0);
    }

    #[test]
    fn radial_trajectory_falls_back() {
        let orbit = Orbit::from_state_vector(
            &Vector3::new(7_000.0, 0.0, 0.0),
            &Vector3::zeros(),
            earth(),
            10.0,
        )
        .unwrap();
        assert_eq!(orbit.eccentricity(), 0.0);
        assert_eq!(orbit.periapsis_distance(), 0.0);
        assert_eq!(orbit.periapsis_time(), 10.0);
        assert_eq!(orbit.velocity_at_true_anomaly(0.3), Vector3::zeros());
    }

    #[test]
    fn invalid_state_vectors_fail_fast() {
        let v = Vector3::new(0.0, 7.5, 0.0);
        assert!(matches!(
            Orbit::from_state_vector(&Vector3::new(f64::NAN, 0.0, 0.0), &v, earth(), 0.0),
            Err(OrbitError::InvalidOrbitState(_))
        ));
        assert!(Orbit::from_state_vector(&Vector3::zeros(), &v, earth(), 0.0).is_err());
        assert!(
            Orbit::from_state_vector(&Vector3::new(7_000.0, 0.0, 0.0), &v, earth(), f64::INFINITY)
                .is_err()
        );
    }

    #[test]
    fn set_by_state_vector_keeps_orbit_on_error() {
        let mut orbit = Orbit::from_elements(&ClassicalElements::circular(7_000.0), earth()).unwrap();
        let before = orbit.clone();
        let err = orbit.set_by_state_vector(&Vector3::zeros(), &Vector3::zeros(), 0.0);
        assert!(err.is_err());
        assert_eq!(orbit, before);

        let v = (orbit.gravitational_parameter() / 8_000.0).sqrt();
        orbit
            .set_by_state_vector(&Vector3::new(0.0, 8_000.0, 0.0), &Vector3::new(-v, 0.0, 0.0), 50.0)
            .unwrap();
        assert_relative_eq!(orbit.semi_major_axis(), 8_000.0, max_relative = 1e-12);
    }
}
