//! # Kepler orbits
//!
//! The [`Orbit`] type holds the conic geometry of a two-body trajectory around an
//! [`Attractor`] and derives every position, velocity and anomaly on demand.
//!
//! ## Stored state
//!
//! | Field                    | Meaning                                                        |
//! |--------------------------|----------------------------------------------------------------|
//! | `semi_major_axis_vector` | center → periapsis, length `a` (unit length for parabolas)     |
//! | `semi_minor_axis_vector` | in-plane, orthogonal, length `b`, opposite to prograde at periapsis |
//! | `eccentricity`           | selects the [`ConicRegime`]                                    |
//! | `periapsis_distance`     | `q`, authoritative for parabolas                               |
//! | `periapsis_time`         | time at which `M = ν = 0`                                      |
//!
//! No anomaly is cached: every time-domain query starts from `periapsis_time`, so a
//! mutation of the reference time can never leave a stale anomaly behind.
//!
//! ## Construction
//!
//! * [`Orbit::from_elements`] – classical elements (see [`elements`]).
//! * [`Orbit::from_state_vector`] – position/velocity sample at a time (see [`state_vector`]).
//! * [`Orbit::set_by_maneuver`](crate::maneuver) – post-burn orbit from a base orbit.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kepler_planner::attractor::Attractor;
//! use kepler_planner::orbit::{elements::ClassicalElements, Orbit};
//!
//! let earth = Arc::new(Attractor::earth());
//! let iss = Orbit::from_elements(&ClassicalElements::circular(6_798.0), earth).unwrap();
//!
//! let (r, v) = iss.state_at_time(1_000.0).unwrap();
//! assert!((r.norm() - 6_798.0).abs() < 1e-6);
//! assert!(v.norm() > 7.0);
//! ```
use std::sync::Arc;

use nalgebra::Vector3;

use crate::attractor::Attractor;
use crate::constants::{Kilometer, Radian, Second};
use crate::kepler::{self, ConicRegime};
use crate::kepler_params::KeplerParams;
use crate::orbit_errors::OrbitError;
use crate::vector::Vector3Ext;

/// Construction from classical orbital elements.
pub mod elements;

/// Sampled points along an orbit, for plotting.
pub mod sampling;

/// Orbit determination from a position/velocity pair.
pub mod state_vector;

/// Descriptive statistics snapshot.
pub mod stats;

/// A two-body conic trajectory around a shared [`Attractor`].
#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    semi_major_axis_vector: Vector3<f64>,
    semi_minor_axis_vector: Vector3<f64>,
    eccentricity: f64,
    periapsis_distance: Kilometer,
    periapsis_time: Second,
    attractor: Arc<Attractor>,
    params: KeplerParams,
}

impl Orbit {
    /// Assemble an orbit from its primary fields, rejecting non-finite geometry.
    pub(crate) fn from_parts(
        semi_major_axis_vector: Vector3<f64>,
        semi_minor_axis_vector: Vector3<f64>,
        eccentricity: f64,
        periapsis_distance: Kilometer,
        periapsis_time: Second,
        attractor: Arc<Attractor>,
        params: KeplerParams,
    ) -> Result<Self, OrbitError> {
        if !(eccentricity.is_finite() && eccentricity >= 0.0) {
            return Err(OrbitError::InvalidOrbitState(format!(
                "eccentricity must be finite and >= 0 (got {eccentricity})"
            )));
        }
        if !(semi_major_axis_vector.iter().all(|c| c.is_finite())
            && semi_minor_axis_vector.iter().all(|c| c.is_finite()))
        {
            return Err(OrbitError::InvalidOrbitState(
                "non-finite axis vector".into(),
            ));
        }
        if !periapsis_distance.is_finite() || periapsis_distance < 0.0 {
            return Err(OrbitError::InvalidOrbitState(format!(
                "invalid periapsis distance {periapsis_distance}"
            )));
        }
        if !periapsis_time.is_finite() {
            return Err(OrbitError::InvalidOrbitState(format!(
                "non-finite periapsis time {periapsis_time}"
            )));
        }
        Ok(Orbit {
            semi_major_axis_vector,
            semi_minor_axis_vector,
            eccentricity,
            periapsis_distance,
            periapsis_time,
            attractor,
            params,
        })
    }

    // ---------------------------------------------------------------------------------------------
    // Stored fields
    // ---------------------------------------------------------------------------------------------

    pub fn semi_major_axis_vector(&self) -> Vector3<f64> {
        self.semi_major_axis_vector
    }

    pub fn semi_minor_axis_vector(&self) -> Vector3<f64> {
        self.semi_minor_axis_vector
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn periapsis_time(&self) -> Second {
        self.periapsis_time
    }

    pub fn attractor(&self) -> &Attractor {
        &self.attractor
    }

    /// Shared handle on the attractor, for building sibling orbits.
    pub fn attractor_handle(&self) -> &Arc<Attractor> {
        &self.attractor
    }

    pub fn params(&self) -> &KeplerParams {
        &self.params
    }

    /// Replace the solver/planner configuration carried by this orbit.
    pub fn with_params(mut self, params: KeplerParams) -> Self {
        self.params = params;
        self
    }

    pub fn regime(&self) -> ConicRegime {
        ConicRegime::from_eccentricity(self.eccentricity)
    }

    // ---------------------------------------------------------------------------------------------
    // Derived geometry
    // ---------------------------------------------------------------------------------------------

    /// Semi-major axis length `a`; `+∞` for a parabola.
    pub fn semi_major_axis(&self) -> Kilometer {
        match self.regime() {
            ConicRegime::Parabolic => f64::INFINITY,
            _ => self.semi_major_axis_vector.norm(),
        }
    }

    /// Semi-minor axis length `b`; `+∞` for a parabola.
    pub fn semi_minor_axis(&self) -> Kilometer {
        match self.regime() {
            ConicRegime::Parabolic => f64::INFINITY,
            _ => self.semi_minor_axis_vector.norm(),
        }
    }

    /// Unit vector from the focus toward periapsis.
    pub fn periapsis_direction(&self) -> Vector3<f64> {
        self.semi_major_axis_vector.normalized_or_zero()
    }

    /// Unit vector along the semi-minor axis (opposite to the periapsis velocity).
    pub fn minor_axis_direction(&self) -> Vector3<f64> {
        self.semi_minor_axis_vector.normalized_or_zero()
    }

    /// Unit normal of the orbital plane; motion is counterclockwise about it.
    pub fn orbit_normal(&self) -> Vector3<f64> {
        self.semi_minor_axis_vector
            .cross(&self.semi_major_axis_vector)
            .normalized_or_zero()
    }

    /// Geometric center of the conic relative to the focus.
    pub fn center_point(&self) -> Vector3<f64> {
        match self.regime() {
            ConicRegime::Elliptical => -self.semi_major_axis_vector * self.eccentricity,
            ConicRegime::Hyperbolic => self.semi_major_axis_vector * self.eccentricity,
            ConicRegime::Parabolic => Vector3::zeros(),
        }
    }

    pub fn periapsis_distance(&self) -> Kilometer {
        self.periapsis_distance
    }

    /// Apoapsis distance `a(1 + e)`; `+∞` for open orbits.
    pub fn apoapsis_distance(&self) -> Kilometer {
        match self.regime() {
            ConicRegime::Elliptical => self.semi_major_axis() * (1.0 + self.eccentricity),
            ConicRegime::Parabolic | ConicRegime::Hyperbolic => f64::INFINITY,
        }
    }

    /// Periapsis height above the attractor's surface.
    pub fn periapsis_altitude(&self) -> Kilometer {
        self.periapsis_distance - self.attractor.radius()
    }

    /// Apoapsis height above the attractor's surface; `+∞` for open orbits.
    pub fn apoapsis_altitude(&self) -> Kilometer {
        self.apoapsis_distance() - self.attractor.radius()
    }

    /// Semi-latus rectum `p`.
    pub fn focal_parameter(&self) -> Kilometer {
        let e = self.eccentricity;
        match self.regime() {
            ConicRegime::Elliptical => self.semi_major_axis() * (1.0 - e * e),
            ConicRegime::Hyperbolic => self.semi_major_axis() * (e * e - 1.0),
            ConicRegime::Parabolic => 2.0 * self.periapsis_distance,
        }
    }

    pub fn gravitational_parameter(&self) -> f64 {
        self.attractor.gravitational_parameter()
    }

    /// Rate of the mean anomaly in rad/s.
    pub fn mean_motion(&self) -> f64 {
        let mu = self.gravitational_parameter();
        match self.regime() {
            ConicRegime::Elliptical | ConicRegime::Hyperbolic => {
                (mu / self.semi_major_axis().powi(3)).sqrt()
            }
            ConicRegime::Parabolic => (mu / (8.0 * self.periapsis_distance.powi(3))).sqrt(),
        }
    }

    /// Orbital period; `+∞` for open orbits.
    pub fn orbital_period(&self) -> Second {
        match self.regime() {
            ConicRegime::Elliptical => {
                kepler::orbital_period(self.semi_major_axis(), self.gravitational_parameter())
            }
            ConicRegime::Parabolic | ConicRegime::Hyperbolic => f64::INFINITY,
        }
    }

    /// True anomaly in `[0, π]` at which the orbit reaches `distance` from the focus.
    pub fn true_anomaly_for_distance(&self, distance: Kilometer) -> Radian {
        kepler::true_anomaly_for_distance(
            distance,
            self.eccentricity,
            self.semi_major_axis(),
            self.periapsis_distance,
        )
    }

    // ---------------------------------------------------------------------------------------------
    // Anomaly queries
    // ---------------------------------------------------------------------------------------------

    /// Position relative to the conic's center at eccentric anomaly `E`.
    pub fn central_position_at_eccentric_anomaly(&self, eccentric_anomaly: Radian) -> Vector3<f64> {
        let major = self.semi_major_axis_vector;
        let minor = self.semi_minor_axis_vector;
        match self.regime() {
            ConicRegime::Elliptical => {
                major * eccentric_anomaly.cos() - minor * eccentric_anomaly.sin()
            }
            ConicRegime::Hyperbolic => {
                -major * eccentric_anomaly.cosh() - minor * eccentric_anomaly.sinh()
            }
            ConicRegime::Parabolic => {
                let nu = eccentric_anomaly;
                let r = 2.0 * self.periapsis_distance / (1.0 + nu.cos());
                self.periapsis_direction() * (r * nu.cos())
                    - self.minor_axis_direction() * (r * nu.sin())
            }
        }
    }

    /// Position relative to the focus at eccentric anomaly `E`.
    pub fn position_at_eccentric_anomaly(&self, eccentric_anomaly: Radian) -> Vector3<f64> {
        self.central_position_at_eccentric_anomaly(eccentric_anomaly) + self.center_point()
    }

    /// Position relative to the focus at true anomaly `ν`.
    pub fn position_at_true_anomaly(&self, true_anomaly: Radian) -> Vector3<f64> {
        self.position_at_eccentric_anomaly(kepler::eccentric_from_true(
            true_anomaly,
            self.eccentricity,
        ))
    }

    /// Velocity at true anomaly `ν`.
    ///
    /// A non-positive focal parameter (collapsed orbit) yields the zero vector.
    pub fn velocity_at_true_anomaly(&self, true_anomaly: Radian) -> Vector3<f64> {
        let p = self.focal_parameter();
        if !(p > 0.0) {
            return Vector3::zeros();
        }
        let k = (self.gravitational_parameter() / p).sqrt();
        let radial = -k * true_anomaly.sin();
        let transverse = -k * (self.eccentricity + true_anomaly.cos());
        self.periapsis_direction() * radial + self.minor_axis_direction() * transverse
    }

    pub fn velocity_at_eccentric_anomaly(&self, eccentric_anomaly: Radian) -> Vector3<f64> {
        self.velocity_at_true_anomaly(kepler::true_from_eccentric(
            eccentric_anomaly,
            self.eccentricity,
        ))
    }

    // ---------------------------------------------------------------------------------------------
    // Time-domain queries
    // ---------------------------------------------------------------------------------------------

    /// Mean anomaly at time `t`, wrapped into `[0, 2π)` for elliptical orbits only.
    ///
    /// A collapsed orbit (non-positive focal parameter, e.g. a radial trajectory)
    /// stays at `M = 0`.
    pub fn mean_anomaly_at_time(&self, time: Second) -> Radian {
        if !(self.focal_parameter() > 0.0) {
            return 0.0;
        }
        let m = (time - self.periapsis_time) * self.mean_motion();
        match self.regime() {
            ConicRegime::Elliptical => kepler::principal_angle(m),
            ConicRegime::Parabolic | ConicRegime::Hyperbolic => m,
        }
    }

    pub fn eccentric_anomaly_at_time(&self, time: Second) -> Result<Radian, OrbitError> {
        kepler::eccentric_from_mean_with(
            self.mean_anomaly_at_time(time),
            self.eccentricity,
            &self.params,
        )
    }

    pub fn true_anomaly_at_time(&self, time: Second) -> Result<Radian, OrbitError> {
        Ok(kepler::true_from_eccentric(
            self.eccentric_anomaly_at_time(time)?,
            self.eccentricity,
        ))
    }

    pub fn position_at_time(&self, time: Second) -> Result<Vector3<f64>, OrbitError> {
        Ok(self.position_at_eccentric_anomaly(self.eccentric_anomaly_at_time(time)?))
    }

    pub fn velocity_at_time(&self, time: Second) -> Result<Vector3<f64>, OrbitError> {
        Ok(self.velocity_at_eccentric_anomaly(self.eccentric_anomaly_at_time(time)?))
    }

    /// Position and velocity at time `t`, solving Kepler's equation once.
    pub fn state_at_time(&self, time: Second) -> Result<(Vector3<f64>, Vector3<f64>), OrbitError> {
        let eccentric_anomaly = self.eccentric_anomaly_at_time(time)?;
        Ok((
            self.position_at_eccentric_anomaly(eccentric_anomaly),
            self.velocity_at_eccentric_anomaly(eccentric_anomaly),
        ))
    }

    /// Time at which the mean anomaly equals `M` on the revolution starting at `periapsis_time`.
    pub fn time_at_mean_anomaly(&self, mean_anomaly: Radian) -> Second {
        self.periapsis_time + mean_anomaly / self.mean_motion()
    }

    pub fn set_periapsis_time(&mut self, periapsis_time: Second) -> Result<(), OrbitError> {
        if !periapsis_time.is_finite() {
            return Err(OrbitError::InvalidOrbitState(format!(
                "non-finite periapsis time {periapsis_time}"
            )));
        }
        self.periapsis_time = periapsis_time;
        Ok(())
    }

    /// Move the time reference so that the mean anomaly is `M` at time `t`.
    pub fn set_periapsis_time_with_mean_anomaly(
        &mut self,
        mean_anomaly: Radian,
        time: Second,
    ) -> Result<(), OrbitError> {
        self.set_periapsis_time(time - mean_anomaly / self.mean_motion())
    }
}
