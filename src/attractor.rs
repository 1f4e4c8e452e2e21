//! # Gravitating bodies
//!
//! An [`Attractor`] is the immutable descriptor of the body at the focus of every
//! [`Orbit`](crate::orbit::Orbit): its mass, physical radius and sphere of
//! influence. Orbits share it through an `Arc` and only read it.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Kilogram, Kilometer, GRAVITATIONAL_CONSTANT};
use crate::orbit_errors::OrbitError;

/// Immutable description of a gravitating body.
///
/// Invariants: `mass > 0`, `radius ≥ 0`, `influence_radius ≥ radius`, all finite
/// (the influence radius may be `+∞`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attractor {
    mass: Kilogram,
    radius: Kilometer,
    influence_radius: Kilometer,
}

impl Attractor {
    /// Build an attractor, validating its invariants.
    ///
    /// Arguments
    /// -----------------
    /// * `mass`: body mass in kilograms.
    /// * `radius`: mean physical radius in kilometers.
    /// * `influence_radius`: sphere-of-influence radius in kilometers.
    ///
    /// Return
    /// ----------
    /// * The attractor, or [`OrbitError::InvalidAttractor`] naming the violated invariant.
    pub fn new(
        mass: Kilogram,
        radius: Kilometer,
        influence_radius: Kilometer,
    ) -> Result<Self, OrbitError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(OrbitError::InvalidAttractor(format!(
                "mass must be finite and > 0 (got {mass})"
            )));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(OrbitError::InvalidAttractor(format!(
                "radius must be finite and >= 0 (got {radius})"
            )));
        }
        if influence_radius.is_nan() || influence_radius < radius {
            return Err(OrbitError::InvalidAttractor(format!(
                "influence radius {influence_radius} is smaller than body radius {radius}"
            )));
        }
        Ok(Attractor {
            mass,
            radius,
            influence_radius,
        })
    }

    /// The Earth: 5.9722e24 kg, 6378 km, sphere of influence 9.29e5 km.
    pub fn earth() -> Self {
        Attractor {
            mass: 5.9722e24,
            radius: 6_378.0,
            influence_radius: 9.29e5,
        }
    }

    /// The Sun: 1.9885e30 kg, 1.3914e6 km, sphere of influence 1e12 km.
    pub fn sun() -> Self {
        Attractor {
            mass: 1.9885e30,
            radius: 1.3914e6,
            influence_radius: 1.0e12,
        }
    }

    pub fn mass(&self) -> Kilogram {
        self.mass
    }

    pub fn radius(&self) -> Kilometer {
        self.radius
    }

    pub fn influence_radius(&self) -> Kilometer {
        self.influence_radius
    }

    /// Standard gravitational parameter μ = G·M, in km³/s².
    pub fn gravitational_parameter(&self) -> f64 {
        self.mass * GRAVITATIONAL_CONSTANT
    }
}

impl fmt::Display for Attractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Attractor(mass = {:e} kg, radius = {} km, influence = {:e} km)",
            self.mass, self.radius, self.influence_radius
        )
    }
}
