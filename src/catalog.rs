//! # Reference bodies and orbits
//!
//! Fixed data used to populate planning scenarios: the eight planets' mean
//! heliocentric elements at J2000 and the Moon's circular reference orbit.
//! Everything here is built on demand from constants; there is no global state.
//!
//! Times are counted in seconds from the J2000 epoch (`t = 0`).
use std::sync::Arc;

use serde::Serialize;

use crate::attractor::Attractor;
use crate::constants::{Degree, Kilometer, RADEG};
use crate::orbit::elements::ClassicalElements;
use crate::orbit::Orbit;
use crate::orbit_errors::OrbitError;

/// Mean Earth–Moon distance, used as the radius of the Moon's reference orbit.
pub const MOON_ORBIT_RADIUS: Kilometer = 384_400.0;

/// Mean elements of a planet at J2000.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlanetElements {
    pub name: &'static str,
    pub eccentricity: f64,
    pub semi_major_axis: Kilometer,
    pub inclination: Degree,
    pub argument_of_periapsis: Degree,
    pub ascending_node: Degree,
    /// Mean longitude `L = Ω + ω + M` at the epoch.
    pub mean_longitude: Degree,
}

impl PlanetElements {
    pub fn classical_elements(&self) -> ClassicalElements {
        ClassicalElements::from_degrees(
            self.eccentricity,
            self.semi_major_axis,
            self.inclination,
            self.argument_of_periapsis,
            self.ascending_node,
        )
    }

    /// Mean anomaly at J2000 in degrees, `M = L − Ω − ω`.
    pub fn mean_anomaly_at_epoch(&self) -> Degree {
        self.mean_longitude - self.ascending_node - self.argument_of_periapsis
    }
}

macro_rules! planet {
    ($name:expr, $e:expr, $a:expr, $i:expr, $w:expr, $node:expr, $l:expr) => {
        PlanetElements {
            name: $name,
            eccentricity: $e,
            semi_major_axis: $a,
            inclination: $i,
            argument_of_periapsis: $w,
            ascending_node: $node,
            mean_longitude: $l,
        }
    };
}

/// Planets of the solar system, inner to outer.
pub const SOLAR_SYSTEM_PLANETS: [PlanetElements; 8] = [
    //       name        ecc       SMA (km)    incl     AOP      AN      MLAE
    planet!("Mercury", 0.2056, 5.79091e7, 7.006, 29.12, 48.34, 252.25),
    planet!("Venus", 0.0068, 1.08209e8, 3.398, 54.88, 76.67, 181.98),
    planet!("Earth", 0.0167, 1.49598e8, 0.000, 114.21, 0.00, 100.47),
    planet!("Mars", 0.0934, 2.27940e8, 1.852, 286.50, 49.71, 355.43),
    planet!("Jupiter", 0.0489, 7.78478e8, 1.299, 273.87, 100.29, 34.33),
    planet!("Saturn", 0.0565, 1.43354e9, 2.494, 339.39, 113.64, 50.08),
    planet!("Uranus", 0.0472, 2.87097e9, 0.077, 97.00, 73.96, 314.20),
    planet!("Neptune", 0.0087, 4.49841e9, 1.770, 273.19, 131.79, 304.22),
];

/// Look a planet up by name, ignoring case.
pub fn planet(name: &str) -> Option<&'static PlanetElements> {
    SOLAR_SYSTEM_PLANETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Heliocentric orbit of a planet, with its periapsis time placed from the J2000
/// mean longitude.
pub fn planet_orbit(record: &PlanetElements, sun: Arc<Attractor>) -> Result<Orbit, OrbitError> {
    let mut orbit = Orbit::from_elements(&record.classical_elements(), sun)?;
    orbit.set_periapsis_time_with_mean_anomaly(record.mean_anomaly_at_epoch() * RADEG, 0.0)?;
    Ok(orbit)
}

/// Circular, equatorial reference orbit of the Moon, at periapsis at J2000.
pub fn moon_orbit(earth: Arc<Attractor>) -> Result<Orbit, OrbitError> {
    Orbit::from_elements(&ClassicalElements::circular(MOON_ORBIT_RADIUS), earth)
}
