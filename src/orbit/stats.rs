use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{Kilometer, Second};
use crate::orbit::Orbit;
use crate::time_format::format_time_with_labels;

/// Snapshot of the descriptive quantities a planner displays for an orbit.
///
/// Open orbits report `+∞` for the apoapsis values and the period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitStats {
    pub eccentricity: f64,
    pub semi_major_axis: Kilometer,
    pub periapsis_distance: Kilometer,
    pub apoapsis_distance: Kilometer,
    pub periapsis_altitude: Kilometer,
    pub apoapsis_altitude: Kilometer,
    pub period: Second,
}

impl Orbit {
    pub fn stats(&self) -> OrbitStats {
        OrbitStats {
            eccentricity: self.eccentricity(),
            semi_major_axis: self.semi_major_axis(),
            periapsis_distance: self.periapsis_distance(),
            apoapsis_distance: self.apoapsis_distance(),
            periapsis_altitude: self.periapsis_altitude(),
            apoapsis_altitude: self.apoapsis_altitude(),
            period: self.orbital_period(),
        }
    }
}

impl fmt::Display for OrbitStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Orbit Statistics")?;
        writeln!(f, "------------------------------------------------")?;
        writeln!(f, "  eccentricity                  = {:.6}", self.eccentricity)?;
        writeln!(f, "  semi-major axis               = {:.3} km", self.semi_major_axis)?;
        writeln!(
            f,
            "  periapsis                     = {:.3} km (altitude {:.3} km)",
            self.periapsis_distance, self.periapsis_altitude
        )?;
        if self.apoapsis_distance.is_finite() {
            writeln!(
                f,
                "  apoapsis                      = {:.3} km (altitude {:.3} km)",
                self.apoapsis_distance, self.apoapsis_altitude
            )?;
        } else {
            writeln!(f, "  apoapsis                      = Infinite")?;
        }
        write!(
            f,
            "  period                        = {}",
            format_time_with_labels(self.period)
        )
    }
}
