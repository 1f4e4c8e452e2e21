//! # Kepler solver and planner parameters
//!
//! This module defines the [`crate::kepler_params::KeplerParams`] configuration struct and its
//! builder, which control the numerical tolerances of the anomaly solver, the degenerate-geometry
//! fallbacks used during orbit determination, and the classification thresholds of the
//! closest-approach search.
//!
//! ## Purpose
//!
//! Every [`Orbit`](crate::orbit::Orbit) carries one [`KeplerParams`] value. The defaults reproduce
//! the reference behavior; the builder lets a caller tighten or relax them with validation:
//!
//! - Stop threshold and **iteration cap** of the hyperbolic Kepler solver,
//! - Squared-norm threshold below which a cross-product basis is considered degenerate,
//! - Inner margin and tangency tolerance of the circular-target rendezvous search,
//! - Maximum eccentricity accepted for a "circular" rendezvous target.
//!
//! ## Example
//!
//! ```rust
//! use kepler_planner::kepler_params::KeplerParams;
//!
//! let params = KeplerParams::builder()
//!     .hyperbolic_tolerance(1e-10)
//!     .hyperbolic_max_iterations(200)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(params.hyperbolic_max_iterations, 200);
//! ```
use crate::orbit_errors::OrbitError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering::{Equal, Greater, Less};
use std::fmt;

/// Configuration parameters of the anomaly solver and the maneuver/rendezvous planner.
///
/// Fields
/// -----------------
/// **Anomaly solver**
/// * `hyperbolic_tolerance` – the Danby/Newton iteration stops once `|δF|` drops below this value.
/// * `hyperbolic_max_iterations` – hard cap on hyperbolic iterations; exceeding it yields
///   [`OrbitError::ConvergenceFailure`].
///
/// **Orbit determination**
/// * `degenerate_basis_threshold` – squared norm below which a normalized cross product is
///   considered degenerate and replaced by a fallback direction.
///
/// **Rendezvous search**
/// * `approach_inner_margin` – a planned orbit whose apoapsis is below
///   `approach_inner_margin × target_radius` never approaches the target.
/// * `tangency_tolerance` – relative tolerance under which an apoapsis equal to the target
///   radius is treated as tangent rather than crossing.
/// * `circular_tolerance` – maximum eccentricity of a target orbit accepted as circular.
///
/// Defaults
/// -----------------
/// * `hyperbolic_tolerance`: 1e-8
/// * `hyperbolic_max_iterations`: 100
/// * `degenerate_basis_threshold`: 0.99
/// * `approach_inner_margin`: 0.95
/// * `tangency_tolerance`: 1e-9
/// * `circular_tolerance`: 1e-6
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerParams {
    pub hyperbolic_tolerance: f64,
    pub hyperbolic_max_iterations: usize,
    pub degenerate_basis_threshold: f64,
    pub approach_inner_margin: f64,
    pub tangency_tolerance: f64,
    pub circular_tolerance: f64,
}

impl KeplerParams {
    /// Construct a new [`KeplerParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`KeplerParamsBuilder`] initialized with the default values.
    pub fn builder() -> KeplerParamsBuilder {
        KeplerParamsBuilder::new()
    }
}

impl Default for KeplerParams {
    fn default() -> Self {
        KeplerParams {
            hyperbolic_tolerance: 1e-8,
            hyperbolic_max_iterations: 100,
            degenerate_basis_threshold: 0.99,
            approach_inner_margin: 0.95,
            tangency_tolerance: 1e-9,
            circular_tolerance: 1e-6,
        }
    }
}

/// Builder for [`KeplerParams`], with validation.
#[derive(Debug, Clone)]
pub struct KeplerParamsBuilder {
    params: KeplerParams,
}

impl Default for KeplerParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl KeplerParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: KeplerParams::default(),
        }
    }

    pub fn hyperbolic_tolerance(mut self, v: f64) -> Self {
        self.params.hyperbolic_tolerance = v;
        self
    }
    pub fn hyperbolic_max_iterations(mut self, v: usize) -> Self {
        self.params.hyperbolic_max_iterations = v;
        self
    }
    pub fn degenerate_basis_threshold(mut self, v: f64) -> Self {
        self.params.degenerate_basis_threshold = v;
        self
    }
    pub fn approach_inner_margin(mut self, v: f64) -> Self {
        self.params.approach_inner_margin = v;
        self
    }
    pub fn tangency_tolerance(mut self, v: f64) -> Self {
        self.params.tangency_tolerance = v;
        self
    }
    pub fn circular_tolerance(mut self, v: f64) -> Self {
        self.params.circular_tolerance = v;
        self
    }

    /// Return true iff x > 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Return true iff a <= b and comparable (i.e., not NaN).
    #[inline]
    fn le(a: f64, b: f64) -> bool {
        matches!(a.partial_cmp(&b), Some(Less) | Some(Equal))
    }

    /// Finalize the builder and produce a [`KeplerParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `hyperbolic_tolerance > 0.0`
    /// * `hyperbolic_max_iterations ≥ 1`
    /// * `0.0 < degenerate_basis_threshold ≤ 1.0`
    /// * `0.0 < approach_inner_margin ≤ 1.0`
    /// * `tangency_tolerance ≥ 0.0`, `circular_tolerance ≥ 0.0`
    ///
    /// Returns
    /// -----------------
    /// * `Ok(KeplerParams)` if every value is valid.
    /// * `Err(OrbitError::InvalidKeplerParameter)` naming the first rejected field otherwise.
    pub fn build(self) -> Result<KeplerParams, OrbitError> {
        let p = &self.params;

        if !Self::gt0(p.hyperbolic_tolerance) {
            return Err(OrbitError::InvalidKeplerParameter(
                "hyperbolic_tolerance must be > 0".into(),
            ));
        }
        if p.hyperbolic_max_iterations == 0 {
            return Err(OrbitError::InvalidKeplerParameter(
                "hyperbolic_max_iterations must be >= 1".into(),
            ));
        }
        if !(Self::gt0(p.degenerate_basis_threshold) && Self::le(p.degenerate_basis_threshold, 1.0))
        {
            return Err(OrbitError::InvalidKeplerParameter(
                "require 0 < degenerate_basis_threshold <= 1".into(),
            ));
        }
        if !(Self::gt0(p.approach_inner_margin) && Self::le(p.approach_inner_margin, 1.0)) {
            return Err(OrbitError::InvalidKeplerParameter(
                "require 0 < approach_inner_margin <= 1".into(),
            ));
        }
        if !Self::ge0(p.tangency_tolerance) {
            return Err(OrbitError::InvalidKeplerParameter(
                "tangency_tolerance must be >= 0".into(),
            ));
        }
        if !Self::ge0(p.circular_tolerance) {
            return Err(OrbitError::InvalidKeplerParameter(
                "circular_tolerance must be >= 0".into(),
            ));
        }

        Ok(self.params)
    }
}

impl fmt::Display for KeplerParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            const PARAM_COL: usize = 44;
            writeln!(f, "Kepler Solver Parameters")?;
            writeln!(f, "------------------------")?;

            macro_rules! line {
                ($fmt:expr, $val:expr, $comment:expr) => {{
                    let s = format!($fmt, $val);
                    let pad = if s.len() < PARAM_COL {
                        " ".repeat(PARAM_COL - s.len())
                    } else {
                        " ".to_string()
                    };
                    writeln!(f, "  {}{}# {}", s, pad, $comment)
                }};
            }

            writeln!(f, "[Anomaly solver]")?;
            line!(
                "hyperbolic_tolerance = {:e}",
                self.hyperbolic_tolerance,
                "Danby step stop threshold"
            )?;
            line!(
                "hyperbolic_max_iterations = {}",
                self.hyperbolic_max_iterations,
                "cap before ConvergenceFailure"
            )?;
            writeln!(f, "[Orbit determination]")?;
            line!(
                "degenerate_basis_threshold = {}",
                self.degenerate_basis_threshold,
                "squared-norm fallback threshold"
            )?;
            writeln!(f, "[Rendezvous]")?;
            line!(
                "approach_inner_margin = {}",
                self.approach_inner_margin,
                "apoapsis/target radius floor"
            )?;
            line!(
                "tangency_tolerance = {:e}",
                self.tangency_tolerance,
                "relative apoapsis tangency"
            )?;
            line!(
                "circular_tolerance = {:e}",
                self.circular_tolerance,
                "max target eccentricity"
            )
        } else {
            write!(
                f,
                "KeplerParams(tol={:e}, max_it={}, basis={}, margin={}, tangency={:e}, circular={:e})",
                self.hyperbolic_tolerance,
                self.hyperbolic_max_iterations,
                self.degenerate_basis_threshold,
                self.approach_inner_margin,
                self.tangency_tolerance,
                self.circular_tolerance
            )
        }
    }
}

#[cfg(test)]
mod kepler_params_test {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        let built = KeplerParams::builder().build().unwrap();
        assert_eq!(built, KeplerParams::default());
    }

    #[test]
    fn rejects_zero_iteration_cap() {
        let err = KeplerParams::builder()
            .hyperbolic_max_iterations(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, OrbitError::InvalidKeplerParameter(_)));
    }

    #[test]
    fn rejects_nan_tolerance() {
        let err = KeplerParams::builder()
            .hyperbolic_tolerance(f64::NAN)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            OrbitError::InvalidKeplerParameter("hyperbolic_tolerance must be > 0".into())
        );
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        assert!(KeplerParams::builder()
            .degenerate_basis_threshold(1.5)
            .build()
            .is_err());
        assert!(KeplerParams::builder()
            .approach_inner_margin(0.0)
            .build()
            .is_err());
        assert!(KeplerParams::builder()
            .tangency_tolerance(-1.0)
            .build()
            .is_err());
    }

    #[test]
    fn alternate_display_lists_every_field() {
        let s = format!("{:#}", KeplerParams::default());
        for name in [
            "hyperbolic_tolerance",
            "hyperbolic_max_iterations",
            "degenerate_basis_threshold",
            "approach_inner_margin",
            "tangency_tolerance",
            "circular_tolerance",
        ] {
            assert!(s.contains(name), "missing {name} in:\n{s}");
        }
    }
}
