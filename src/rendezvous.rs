//! # Closest approach to a circular target orbit
//!
//! Given a planned orbit (typically the output of a maneuver) and a circular,
//! coplanar target orbit of radius `R`, the search reports at most two times at
//! which the planned trajectory comes closest to the target's track:
//!
//! | Case                                        | Candidates                          |
//! |---------------------------------------------|-------------------------------------|
//! | apoapsis `< margin·R` or periapsis `> R`    | none                                |
//! | apoapsis `≤ R` (tangency tolerance applied) | next apoapsis passage               |
//! | periapsis `≈ R` (tangency tolerance)        | next periapsis passage              |
//! | elliptical, crosses `R`                     | both crossings, chronological       |
//! | open orbit, crosses `R`                     | next crossing only                  |
//!
//! Crossings are located with the radial condition `|r(t)| = R`. This equals the
//! true pairwise-distance minimum only when the target is circular and coplanar
//! with the planned orbit, so the target's eccentricity is checked against
//! [`KeplerParams::circular_tolerance`](crate::kepler_params::KeplerParams) and
//! coplanarity is assumed.
use log::debug;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::{Kilometer, Radian, Second, DPI};
use crate::kepler::{self, ConicRegime};
use crate::orbit::Orbit;
use crate::orbit_errors::OrbitError;
use crate::vector::Vector3Ext;

/// A candidate rendezvous event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Approach {
    /// Time of the event.
    pub time: Second,
    /// Distance between the two bodies at `time`.
    pub distance: Kilometer,
    /// `| |r_planned| − R |`, zero at a crossing.
    pub radial_separation: Kilometer,
    pub planned_position: Vector3<f64>,
    pub target_position: Vector3<f64>,
}

/// Zero, one or two approaches, in chronological order.
pub type Approaches = SmallVec<[Approach; 2]>;

/// Distance between the bodies on `planned` and `target` at time `t`.
pub fn distance_to_target_at_time(
    planned: &Orbit,
    target: &Orbit,
    time: Second,
) -> Result<Kilometer, OrbitError> {
    Ok(planned
        .position_at_time(time)?
        .distance_to(&target.position_at_time(time)?))
}

/// Smallest `time + k·period` (integer `k`) not earlier than `not_before`.
fn next_passage(time: Second, period: Second, not_before: Second) -> Second {
    let turns = ((not_before - time) / period).ceil();
    time + turns * period
}

/// Time at which `orbit` is at true anomaly `ν` on the pass anchored at its periapsis time.
fn time_at_true_anomaly(orbit: &Orbit, true_anomaly: Radian) -> Second {
    let e = orbit.eccentricity();
    let mean_anomaly = kepler::mean_from_eccentric(kepler::eccentric_from_true(true_anomaly, e), e);
    orbit.time_at_mean_anomaly(mean_anomaly)
}

fn approach_at(
    planned: &Orbit,
    target: &Orbit,
    target_radius: Kilometer,
    time: Second,
) -> Result<Approach, OrbitError> {
    let planned_position = planned.position_at_time(time)?;
    let target_position = target.position_at_time(time)?;
    Ok(Approach {
        time,
        distance: planned_position.distance_to(&target_position),
        radial_separation: (planned_position.norm() - target_radius).abs(),
        planned_position,
        target_position,
    })
}

/// Candidate closest-approach events between `planned` and a circular `target`.
///
/// Arguments
/// -----------------
/// * `planned`: the trajectory after the maneuver; its [`KeplerParams`](crate::kepler_params::KeplerParams)
///   drive the classification thresholds.
/// * `target`: circular orbit around the same attractor, assumed coplanar.
/// * `maneuver_time`: only passages at or after this time are reported.
///
/// Return
/// ----------
/// * Up to two [`Approach`] values in chronological order.
/// * [`OrbitError::AttractorMismatch`] if the orbits have different attractors,
///   [`OrbitError::NonCircularTarget`] if the target is not circular.
pub fn closest_approaches_to_circular_orbit(
    planned: &Orbit,
    target: &Orbit,
    maneuver_time: Second,
) -> Result<Approaches, OrbitError> {
    if planned.attractor() != target.attractor() {
        return Err(OrbitError::AttractorMismatch);
    }
    let params = planned.params();
    if target.eccentricity() > params.circular_tolerance {
        return Err(OrbitError::NonCircularTarget(target.eccentricity()));
    }

    let target_radius = target.semi_major_axis();
    let apoapsis = planned.apoapsis_distance();
    let periapsis = planned.periapsis_distance();
    let mut approaches = Approaches::new();

    let tolerance = params.tangency_tolerance;
    if apoapsis < params.approach_inner_margin * target_radius
        || periapsis > target_radius * (1.0 + tolerance)
    {
        debug!(
            "no approach: planned orbit [{periapsis:.3}, {apoapsis:.3}] km vs target radius {target_radius:.3} km"
        );
        return Ok(approaches);
    }

    if apoapsis <= target_radius * (1.0 + tolerance) {
        let period = planned.orbital_period();
        let apoapsis_time = next_passage(
            planned.periapsis_time() + 0.5 * period,
            period,
            maneuver_time,
        );
        debug!("planned orbit inside target radius: single approach at apoapsis t = {apoapsis_time:.3}");
        approaches.push(approach_at(planned, target, target_radius, apoapsis_time)?);
        return Ok(approaches);
    }

    if periapsis >= target_radius * (1.0 - tolerance) {
        let periapsis_time = match planned.regime() {
            ConicRegime::Elliptical => Some(next_passage(
                planned.periapsis_time(),
                planned.orbital_period(),
                maneuver_time,
            )),
            ConicRegime::Parabolic | ConicRegime::Hyperbolic => {
                Some(planned.periapsis_time()).filter(|&t| t >= maneuver_time)
            }
        };
        match periapsis_time {
            Some(time) => {
                debug!("planned periapsis touches target radius: single approach at t = {time:.3}");
                approaches.push(approach_at(planned, target, target_radius, time)?);
            }
            None => debug!("open planned orbit already passed its periapsis contact"),
        }
        return Ok(approaches);
    }

    let crossing = planned.true_anomaly_for_distance(target_radius);
    match planned.regime() {
        ConicRegime::Elliptical => {
            let period = planned.orbital_period();
            let mut times = [crossing, DPI - crossing]
                .map(|nu| next_passage(time_at_true_anomaly(planned, nu), period, maneuver_time));
            times.sort_by(f64::total_cmp);
            debug!("planned orbit crosses target radius at t = {times:?}");
            for time in times {
                approaches.push(approach_at(planned, target, target_radius, time)?);
            }
        }
        ConicRegime::Parabolic | ConicRegime::Hyperbolic => {
            let next = [-crossing, crossing]
                .map(|nu| time_at_true_anomaly(planned, nu))
                .into_iter()
                .find(|&t| t >= maneuver_time);
            match next {
                Some(time) => {
                    debug!("open planned orbit crosses target radius at t = {time:.3}");
                    approaches.push(approach_at(planned, target, target_radius, time)?);
                }
                None => debug!("open planned orbit already left the target radius"),
            }
        }
    }

    Ok(approaches)
}
