//! # Anomaly conversions and Kepler's equation
//!
//! Stateless conversions between the true (ν), eccentric (E) and mean (M)
//! anomalies, valid for the three conic regimes, together with the per-regime
//! solvers of Kepler's equation.
//!
//! | Regime     | Eccentricity | Kepler's equation         | Solver                         |
//! |------------|--------------|---------------------------|--------------------------------|
//! | Elliptical | `e < 1`      | `M = E − e·sin E`          | fixed-count higher-order step  |
//! | Parabolic  | `e = 1`      | `M = ½(D + D³/3)`, `D = tan(E/2)` | closed-form cubic root |
//! | Hyperbolic | `e > 1`      | `M = e·sinh F − F`         | Danby iteration, capped        |
//!
//! In the parabolic regime no distinct eccentric anomaly exists; the value
//! passed around as "eccentric anomaly" is the true anomaly itself.
use std::f64::consts::PI;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{Kilometer, Radian, Second, DPI};
use crate::kepler_params::KeplerParams;
use crate::orbit_errors::OrbitError;

/// Conic section family selected by the eccentricity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConicRegime {
    Elliptical,
    Parabolic,
    Hyperbolic,
}

impl ConicRegime {
    /// Classify an eccentricity. Only `e == 1.0` exactly is parabolic.
    pub fn from_eccentricity(eccentricity: f64) -> Self {
        if eccentricity < 1.0 {
            ConicRegime::Elliptical
        } else if eccentricity > 1.0 {
            ConicRegime::Hyperbolic
        } else {
            ConicRegime::Parabolic
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, ConicRegime::Elliptical)
    }
}

/// Principal value of an angle in `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    a.rem_euclid(DPI)
}

/// Principal value of an angle in `(−π, π]`.
pub fn signed_principal_angle(a: Radian) -> Radian {
    let a = principal_angle(a);
    if a > PI {
        a - DPI
    } else {
        a
    }
}

/// Inverse hyperbolic cosine extended to return `0` below its domain.
///
/// Near-parabolic trajectories routinely produce arguments a few ulps under 1.
pub fn acosh_or_zero(x: f64) -> f64 {
    if x < 1.0 {
        0.0
    } else {
        (x + (x * x - 1.0).sqrt()).ln()
    }
}

/// Clamped arc-cosine, defined for every non-NaN argument.
fn acos_clamped(x: f64) -> Radian {
    x.clamp(-1.0, 1.0).acos()
}

/// Convert an eccentric (or hyperbolic) anomaly into the true anomaly.
///
/// Arguments
/// -----------------
/// * `eccentric_anomaly`: E for ellipses, F for hyperbolas, ν for parabolas.
/// * `eccentricity`: orbit eccentricity.
///
/// Return
/// ----------
/// * The true anomaly. Elliptical results lie in `[0, 2π)`, hyperbolic ones in `(−π, π)`.
pub fn true_from_eccentric(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let e = eccentricity;
    match ConicRegime::from_eccentricity(e) {
        ConicRegime::Elliptical => {
            let big_e = principal_angle(eccentric_anomaly);
            let cos_e = big_e.cos();
            let nu = acos_clamped((cos_e - e) / (1.0 - e * cos_e));
            if big_e > PI {
                DPI - nu
            } else {
                nu
            }
        }
        ConicRegime::Hyperbolic => {
            let f = eccentric_anomaly;
            ((e * e - 1.0).sqrt() * f.sinh()).atan2(e - f.cosh())
        }
        ConicRegime::Parabolic => eccentric_anomaly,
    }
}

/// Convert a true anomaly into the eccentric (or hyperbolic) anomaly.
pub fn eccentric_from_true(true_anomaly: Radian, eccentricity: f64) -> Radian {
    let e = eccentricity;
    match ConicRegime::from_eccentricity(e) {
        ConicRegime::Elliptical => {
            let nu = principal_angle(true_anomaly);
            let cos_nu = nu.cos();
            let big_e = acos_clamped((e + cos_nu) / (1.0 + e * cos_nu));
            if nu > PI {
                DPI - big_e
            } else {
                big_e
            }
        }
        ConicRegime::Hyperbolic => {
            let nu = signed_principal_angle(true_anomaly);
            let cos_nu = nu.cos();
            let f = acosh_or_zero((e + cos_nu) / (1.0 + e * cos_nu));
            f.copysign(nu)
        }
        ConicRegime::Parabolic => true_anomaly,
    }
}

/// Mean anomaly from eccentric anomaly (Kepler's equation, per regime).
pub fn mean_from_eccentric(eccentric_anomaly: Radian, eccentricity: f64) -> Radian {
    let e = eccentricity;
    match ConicRegime::from_eccentricity(e) {
        ConicRegime::Elliptical => eccentric_anomaly - e * eccentric_anomaly.sin(),
        ConicRegime::Hyperbolic => e * eccentric_anomaly.sinh() - eccentric_anomaly,
        ConicRegime::Parabolic => {
            let t = (0.5 * eccentric_anomaly).tan();
            0.5 * (t + t * t * t / 3.0)
        }
    }
}

/// Solve Kepler's equation with the default [`KeplerParams`].
///
/// See [`eccentric_from_mean_with`].
pub fn eccentric_from_mean(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, OrbitError> {
    eccentric_from_mean_with(mean_anomaly, eccentricity, &KeplerParams::default())
}

/// Solve Kepler's equation for the eccentric anomaly.
///
/// Arguments
/// -----------------
/// * `mean_anomaly`: mean anomaly in radians. Elliptical inputs outside `[0, 2π)`
///   are solved on their principal value and the whole turns are added back.
/// * `eccentricity`: orbit eccentricity, `≥ 0`.
/// * `params`: hyperbolic tolerance and iteration cap.
///
/// Return
/// ----------
/// * The eccentric anomaly (hyperbolic anomaly for `e > 1`, true anomaly for `e = 1`).
/// * [`OrbitError::ConvergenceFailure`] if the hyperbolic iteration exceeds its cap.
pub fn eccentric_from_mean_with(
    mean_anomaly: Radian,
    eccentricity: f64,
    params: &KeplerParams,
) -> Result<Radian, OrbitError> {
    match ConicRegime::from_eccentricity(eccentricity) {
        ConicRegime::Elliptical => {
            let reduced = principal_angle(mean_anomaly);
            let turns = mean_anomaly - reduced;
            Ok(solve_elliptical(reduced, eccentricity) + turns)
        }
        ConicRegime::Hyperbolic => solve_hyperbolic(
            mean_anomaly,
            eccentricity,
            params.hyperbolic_tolerance,
            params.hyperbolic_max_iterations,
        ),
        ConicRegime::Parabolic => Ok(solve_parabolic(mean_anomaly)),
    }
}

/// Fixed-count higher-order iteration on `E − e·sin E = M`.
///
/// The step count grows with eccentricity, from 2 for circles to 6 near `e = 1`.
fn solve_elliptical(mean_anomaly: Radian, eccentricity: f64) -> Radian {
    let e = eccentricity;
    let iterations = 2 * ((e + 0.7) * 1.25).ceil() as usize;

    let mut m = mean_anomaly;
    for _ in 0..iterations {
        let esin = e * m.sin();
        let ecos = e * m.cos();
        let delta = m - esin - mean_anomaly;
        let n = 1.0 - ecos;
        m += -5.0 * delta / (n + n.signum() * (16.0 * n * n - 20.0 * delta * esin).abs().sqrt());
    }
    m
}

/// Danby iteration on `e·sinh F − F = M`.
fn solve_hyperbolic(
    mean_anomaly: Radian,
    eccentricity: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Radian, OrbitError> {
    let e = eccentricity;
    let mut f = (2.0 * mean_anomaly.abs() / e + 1.8).ln().copysign(mean_anomaly);
    if !f.is_finite() {
        return Ok(mean_anomaly);
    }

    for _ in 0..max_iterations {
        let delta = (e * f.sinh() - f - mean_anomaly) / (e * f.cosh() - 1.0);
        f -= delta;
        if delta.abs() <= tolerance {
            return Ok(f);
        }
    }

    warn!(
        "hyperbolic Kepler solver stopped after {max_iterations} iterations (e = {e}, M = {mean_anomaly})"
    );
    Err(OrbitError::ConvergenceFailure {
        eccentricity: e,
        mean_anomaly,
        iterations: max_iterations,
    })
}

/// Closed-form root of Barker's cubic `D³ + 3D − 6M = 0`, returned as `2·atan(D)`.
fn solve_parabolic(mean_anomaly: Radian) -> Radian {
    let m = 2.0 * mean_anomaly.abs();
    let v = 12.0 * m + 4.0 * (4.0 + 9.0 * m * m).sqrt();
    let cbrt_v = v.cbrt();
    let t = 0.5 * cbrt_v - 2.0 / cbrt_v;
    (2.0 * t.atan()).copysign(mean_anomaly)
}

/// True anomaly at which the orbit reaches the radial distance `distance`.
///
/// Only the ascending solution in `[0, π]` is returned; the descending crossing is
/// `2π − ν` (or `−ν` for open orbits). Distances outside the orbit's radial range
/// are clamped to periapsis (`0`) or apoapsis/asymptote; an infinite distance maps
/// to the asymptotic true anomaly. A circle returns `0`.
///
/// Arguments
/// -----------------
/// * `distance`: radial distance from the focus.
/// * `eccentricity`: orbit eccentricity.
/// * `semi_major_axis`: semi-major axis length (unused for parabolas).
/// * `periapsis_distance`: periapsis distance (used for parabolas only).
pub fn true_anomaly_for_distance(
    distance: Kilometer,
    eccentricity: f64,
    semi_major_axis: Kilometer,
    periapsis_distance: Kilometer,
) -> Radian {
    let e = eccentricity;
    let a = semi_major_axis;
    if distance.is_infinite() {
        let limit = match ConicRegime::from_eccentricity(e) {
            ConicRegime::Parabolic => -1.0,
            _ => -1.0 / e,
        };
        return acos_clamped(limit);
    }
    let cos_nu = match ConicRegime::from_eccentricity(e) {
        ConicRegime::Elliptical => (a * (1.0 - e * e) - distance) / (distance * e),
        ConicRegime::Hyperbolic => (a * (e * e - 1.0) - distance) / (distance * e),
        ConicRegime::Parabolic => 2.0 * periapsis_distance / distance - 1.0,
    };
    if cos_nu.is_nan() {
        0.0
    } else {
        acos_clamped(cos_nu)
    }
}

/// Period of an elliptical orbit, `2π·√(a³/μ)`.
pub fn orbital_period(semi_major_axis: Kilometer, gravitational_parameter: f64) -> Second {
    DPI * (semi_major_axis.powi(3) / gravitational_parameter).sqrt()
}
