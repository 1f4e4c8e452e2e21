use std::sync::Arc;

use approx::assert_relative_eq;
use kepler_planner::{Attractor, ClassicalElements, Orbit, OrbitStats};

/// Earth, shared.
pub fn earth() -> Arc<Attractor> {
    Arc::new(Attractor::earth())
}

/// Circular equatorial orbit at `altitude` km above the Earth's surface.
pub fn circular_earth_orbit(altitude: f64) -> Orbit {
    let radius = Attractor::earth().radius() + altitude;
    Orbit::from_elements(&ClassicalElements::circular(radius), earth()).unwrap()
}

#[allow(dead_code)]
pub fn assert_stats_close(actual: &OrbitStats, expected: &OrbitStats, max_relative: f64) {
    assert_relative_eq!(
        actual.periapsis_distance,
        expected.periapsis_distance,
        max_relative = max_relative
    );
    assert_relative_eq!(
        actual.apoapsis_distance,
        expected.apoapsis_distance,
        max_relative = max_relative
    );
    assert_relative_eq!(actual.period, expected.period, max_relative = max_relative);
    assert_relative_eq!(
        actual.semi_major_axis,
        expected.semi_major_axis,
        max_relative = max_relative
    );
}
