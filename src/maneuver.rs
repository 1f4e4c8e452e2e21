//! # Impulsive maneuvers
//!
//! A maneuver is an instantaneous velocity change applied at a node of a base
//! orbit. The delta-v is expressed in the local **prograde / normal / inward**
//! basis at the node:
//!
//! * prograde – along the velocity,
//! * normal – along the orbit normal (motion is counterclockwise about it),
//! * inward – `normal × prograde`, toward the attractor side of the trajectory.
//!
//! The post-burn trajectory is always a brand-new [`Orbit`] obtained by orbit
//! determination on the burned state vector; the base orbit is never touched.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kepler_planner::attractor::Attractor;
//! use kepler_planner::maneuver::{apply_maneuver, DeltaV};
//! use kepler_planner::orbit::{elements::ClassicalElements, Orbit};
//!
//! let base = Orbit::from_elements(
//!     &ClassicalElements::circular(6_798.0),
//!     Arc::new(Attractor::earth()),
//! )
//! .unwrap();
//!
//! // +100 m/s prograde at periapsis
//! let planned = apply_maneuver(&base, 0.0, base.time_at_mean_anomaly(0.0), &DeltaV::prograde(0.1)).unwrap();
//! assert!(planned.apoapsis_distance() > planned.periapsis_distance());
//! ```
use std::sync::Arc;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::{KilometerPerSecond, Radian, Second};
use crate::kepler;
use crate::orbit::Orbit;
use crate::orbit_errors::OrbitError;
use crate::vector::Vector3Ext;

/// Velocity change in the local maneuver basis, in km/s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DeltaV {
    pub prograde: KilometerPerSecond,
    pub normal: KilometerPerSecond,
    pub inward: KilometerPerSecond,
}

impl DeltaV {
    pub fn new(
        prograde: KilometerPerSecond,
        normal: KilometerPerSecond,
        inward: KilometerPerSecond,
    ) -> Self {
        DeltaV {
            prograde,
            normal,
            inward,
        }
    }

    /// Pure prograde (negative: retrograde) burn.
    pub fn prograde(prograde: KilometerPerSecond) -> Self {
        DeltaV {
            prograde,
            ..Default::default()
        }
    }

    /// Total delta-v budget of the burn.
    pub fn magnitude(&self) -> KilometerPerSecond {
        (self.prograde.powi(2) + self.normal.powi(2) + self.inward.powi(2)).sqrt()
    }
}

/// Orthonormal prograde / normal / inward triad at a point of an orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManeuverBasis {
    pub prograde: Vector3<f64>,
    pub normal: Vector3<f64>,
    pub inward: Vector3<f64>,
}

impl ManeuverBasis {
    /// Express a [`DeltaV`] in the inertial frame.
    pub fn to_inertial(&self, delta_v: &DeltaV) -> Vector3<f64> {
        self.prograde * delta_v.prograde
            + self.normal * delta_v.normal
            + self.inward * delta_v.inward
    }
}

/// Maneuver basis of `orbit` at eccentric anomaly `E`.
///
/// `inward` is `normal × prograde`; the reverse product `prograde × normal` points away from the attractor.
pub fn maneuver_basis(orbit: &Orbit, eccentric_anomaly: Radian) -> ManeuverBasis {
    let prograde = orbit
        .velocity_at_eccentric_anomaly(eccentric_anomaly)
        .normalized_or_zero();
    let normal = orbit.orbit_normal();
    ManeuverBasis {
        prograde,
        normal,
        inward: normal.cross(&prograde),
    }
}

/// Orbit resulting from an impulsive burn on `base`.
///
/// Arguments
/// -----------------
/// * `base`: the orbit before the burn; it is not modified.
/// * `mean_anomaly_at_node`: mean anomaly of the burn point on `base`.
/// * `burn_time`: time of the burn, used as the epoch of the new state vector.
/// * `delta_v`: velocity change in the node's maneuver basis.
///
/// Return
/// ----------
/// * A fresh orbit sharing the attractor and parameters of `base`.
/// * [`OrbitError::ConvergenceFailure`] if the node anomaly cannot be solved, or
///   [`OrbitError::InvalidOrbitState`] if the burned state is degenerate.
pub fn apply_maneuver(
    base: &Orbit,
    mean_anomaly_at_node: Radian,
    burn_time: Second,
    delta_v: &DeltaV,
) -> Result<Orbit, OrbitError> {
    let eccentric_anomaly =
        kepler::eccentric_from_mean_with(mean_anomaly_at_node, base.eccentricity(), base.params())?;
    let position = base.position_at_eccentric_anomaly(eccentric_anomaly);
    let velocity = base.velocity_at_eccentric_anomaly(eccentric_anomaly);
    let basis = maneuver_basis(base, eccentric_anomaly);

    Orbit::from_state_vector_with_params(
        &position,
        &(velocity + basis.to_inertial(delta_v)),
        Arc::clone(base.attractor_handle()),
        burn_time,
        *base.params(),
    )
}

impl Orbit {
    /// Replace this (planned) orbit with the result of a burn on `base`.
    ///
    /// On error this orbit is left unchanged.
    pub fn set_by_maneuver(
        &mut self,
        base: &Orbit,
        mean_anomaly_at_node: Radian,
        burn_time: Second,
        delta_v: &DeltaV,
    ) -> Result<(), OrbitError> {
        *self = apply_maneuver(base, mean_anomaly_at_node, burn_time, delta_v)?;
        Ok(())
    }
}
