//! Two-body Kepler orbit propagation with impulsive maneuver and rendezvous planning.
//!
//! Build an [`Attractor`], construct an [`Orbit`] from classical elements or a
//! state vector, query positions and velocities by anomaly or time, then plan
//! burns with [`maneuver`] and search approaches with [`rendezvous`].
pub mod attractor;
pub mod catalog;
pub mod constants;
pub mod kepler;
pub mod kepler_params;
pub mod maneuver;
pub mod orbit;
pub mod orbit_errors;
pub mod rendezvous;
pub mod time_format;
pub mod vector;

pub use attractor::Attractor;
pub use kepler::ConicRegime;
pub use kepler_params::KeplerParams;
pub use maneuver::{apply_maneuver, DeltaV};
pub use orbit::elements::ClassicalElements;
pub use orbit::stats::OrbitStats;
pub use orbit::Orbit;
pub use orbit_errors::OrbitError;
pub use rendezvous::{closest_approaches_to_circular_orbit, Approach, Approaches};
