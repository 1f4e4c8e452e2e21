use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    #[error("Invalid attractor: {0}")]
    InvalidAttractor(String),

    #[error("Invalid orbit state: {0}")]
    InvalidOrbitState(String),

    #[error("Invalid Kepler solver parameter: {0}")]
    InvalidKeplerParameter(String),

    #[error(
        "Hyperbolic Kepler solver did not converge after {iterations} iterations \
         (e = {eccentricity}, M = {mean_anomaly})"
    )]
    ConvergenceFailure {
        eccentricity: f64,
        mean_anomaly: f64,
        iterations: usize,
    },

    #[error("Rendezvous target orbit is not circular (e = {0})")]
    NonCircularTarget(f64),

    #[error("Planned and target orbits do not share the same attractor")]
    AttractorMismatch,
}
