use std::f64::consts::PI;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::constants::Kilometer;
use crate::kepler::ConicRegime;
use crate::orbit::Orbit;

/// Focus-relative points along an orbit, ordered by increasing true anomaly.
///
/// `closed` is set when the points cover the whole ellipse and the last point
/// should be joined back to the first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrbitSample {
    pub points: Vec<Vector3<f64>>,
    pub closed: bool,
}

impl OrbitSample {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}

impl Orbit {
    /// Sample `count` points along the orbit, clipped at `max_distance` from the focus.
    ///
    /// An ellipse whose apoapsis lies within the clip distance is sampled over the
    /// full turn `[−π, π)` and flagged closed. Otherwise the sample spans
    /// `[−θ, θ]` endpoints included, with `θ` the true anomaly at the clip distance.
    /// The clip distance never exceeds the attractor's sphere of influence.
    ///
    /// An empty sample is returned when `count < 2` or when the clip distance is
    /// below the periapsis.
    pub fn sample_orbit_points(&self, count: usize, max_distance: Kilometer) -> OrbitSample {
        let max_distance = max_distance.min(self.attractor.influence_radius());
        let periapsis = self.periapsis_distance();
        if count < 2 || max_distance.is_nan() || max_distance < periapsis {
            return OrbitSample::default();
        }

        let closed = self.regime() == ConicRegime::Elliptical
            && self.apoapsis_distance() < max_distance;
        let (max_angle, steps) = if closed {
            (PI, count as f64)
        } else {
            (self.true_anomaly_for_distance(max_distance), (count - 1) as f64)
        };

        let points = (0..count)
            .map(|i| {
                let true_anomaly = -max_angle + i as f64 * 2.0 * max_angle / steps;
                self.position_at_true_anomaly(true_anomaly)
            })
            .collect();

        OrbitSample { points, closed }
    }
}

#[cfg(test)]
mod sampling_test {
    use super::*;
    use crate::attractor::Attractor;
    use crate::orbit::elements::ClassicalElements;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn orbit(eccentricity: f64, semi_major_axis: f64) -> Orbit {
        Orbit::from_elements(
            &ClassicalElements {
                eccentricity,
                semi_major_axis,
                ..Default::default()
            },
            Arc::new(Attractor::earth()),
        )
        .unwrap()
    }

    #[test]
    fn full_ellipse_is_closed() {
        let sample = orbit(0.2, 10_000.0).sample_orbit_points(180, 1e6);
        assert!(sample.closed);
        assert_eq!(sample.len(), 180);
        assert!(sample
            .points
            .iter()
            .all(|p| p.norm() >= 8_000.0 - 1e-6 && p.norm() <= 12_000.0 + 1e-6));
    }

    #[test]
    fn clipped_ellipse_is_open() {
        let sample = orbit(0.2, 10_000.0).sample_orbit_points(90, 11_000.0);
        assert!(!sample.closed);
        assert_eq!(sample.len(), 90);
        assert_relative_eq!(sample.points[0].norm(), 11_000.0, max_relative = 1e-9);
        assert_relative_eq!(sample.points[89].norm(), 11_000.0, max_relative = 1e-9);
    }

    #[test]
    fn hyperbola_is_clipped() {
        let sample = orbit(1.5, 10_000.0).sample_orbit_points(50, 200_000.0);
        assert!(!sample.closed);
        assert_relative_eq!(sample.points[0].norm(), 200_000.0, max_relative = 1e-9);
        assert!(sample.points.iter().all(|p| p.norm() <= 200_000.0 * (1.0 + 1e-9)));
    }

    #[test]
    fn influence_radius_bounds_the_clip() {
        let sample = orbit(1.5, 10_000.0).sample_orbit_points(10, f64::INFINITY);
        let influence = Attractor::earth().influence_radius();
        assert_relative_eq!(sample.points[9].norm(), influence, max_relative = 1e-9);
    }

    #[test]
    fn degenerate_requests_are_empty() {
        let o = orbit(0.2, 10_000.0);
        assert!(o.sample_orbit_points(1, 1e6).is_empty());
        assert!(o.sample_orbit_points(10, 1_000.0).is_empty());
    }
}
