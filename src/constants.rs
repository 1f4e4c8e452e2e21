//! # Constants and type definitions
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **unit
//! aliases** used throughout the crate.
//!
//! ## Units
//!
//! The whole crate works in a single, consistent unit system:
//!
//! - Lengths in **kilometers**
//! - Masses in **kilograms**
//! - Times in **seconds**
//! - Angles in **radians**
//!
//! The gravitational constant is therefore expressed in km³/(kg·s²).

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Newtonian gravitational constant in km³/(kg·s²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.6743e-20;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Radians → degrees
pub const DEGRAD: f64 = 180.0 / std::f64::consts::PI;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Number of seconds in a day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Below this magnitude a vector is treated as having no direction.
pub const VECTOR_EPSILON: f64 = 1.401298e-45;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in kilometers
pub type Kilometer = f64;
/// Speed in kilometers per second
pub type KilometerPerSecond = f64;
/// Mass in kilograms
pub type Kilogram = f64;
/// Time coordinate or duration in seconds
pub type Second = f64;
