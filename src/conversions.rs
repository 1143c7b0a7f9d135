//! # Unit Conversions
//!
//! The simulator reports most values in SI or imperial engineering units that
//! differ from what a G1000 log records. Every conversion here is affine, so
//! they can be chained and (where physically meaningful) inverted.
//!
//! ```
//! use g1k_logger::conversions::{c_to_f, f_to_c};
//!
//! assert_eq!(c_to_f(100.0), 212.0);
//! assert!((f_to_c(c_to_f(15.0)) - 15.0).abs() < 1e-9);
//! ```

/// Radians to degrees multiplier
pub const DEG_PER_RAD: f64 = 57.2958;

/// Knots per metre per second
pub const KT_PER_MPS: f64 = 1.94384;

/// Standard gravity in g per ft/s²
pub const G_PER_FPS2: f64 = 0.031;

/// Offset between the Rankine and Fahrenheit scales
pub const RANKINE_OFFSET: f64 = 459.67;

/// Metres in one nautical mile
pub const METRES_PER_NM: f64 = 1852.0;

/// Feet per metre
pub const FT_PER_M: f64 = 3.28084;

/// Full-scale deflection of a CDI/GSI needle in simulator units
pub const CDI_FULL_SCALE: f64 = 127.0;

/// Celsius to Fahrenheit
pub fn c_to_f(x: f64) -> f64 {
    x * 1.8 + 32.0
}

/// Fahrenheit to Celsius
pub fn f_to_c(x: f64) -> f64 {
    (x - 32.0) / 1.8
}

/// Metres per second to knots
pub fn mps_to_kt(x: f64) -> f64 {
    x * KT_PER_MPS
}

/// Radians to degrees
pub fn rad_to_deg(x: f64) -> f64 {
    x * DEG_PER_RAD
}

/// Feet per second squared to g
pub fn fps2_to_g(x: f64) -> f64 {
    x * G_PER_FPS2
}

/// Rankine to Fahrenheit
pub fn rankine_to_f(x: f64) -> f64 {
    x - RANKINE_OFFSET
}

/// Pounds per square foot to pounds per square inch
pub fn psf_to_psi(x: f64) -> f64 {
    x / 144.0
}

/// Metres to nautical miles
pub fn m_to_nm(x: f64) -> f64 {
    x / METRES_PER_NM
}

/// Metres to feet
pub fn m_to_ft(x: f64) -> f64 {
    x * FT_PER_M
}

/// Feet per second to feet per minute
pub fn fps_to_fpm(x: f64) -> f64 {
    x * 60.0
}

/// Raw needle deflection to a fraction of full scale (-1.0 to 1.0)
pub fn cdi_to_fsd(x: f64) -> f64 {
    x / CDI_FULL_SCALE
}
