//! Radius units for cone search queries
//!
//! Search radii arrive on the command line in degrees, arcminutes or
//! arcseconds; the services expect degrees.

use clap::ValueEnum;

/// Conversion factor from arcminutes to degrees
pub const ARCMIN_TO_DEG: f64 = 1.0 / 60.0;

/// Conversion factor from arcseconds to degrees
pub const ARCSEC_TO_DEG: f64 = 1.0 / 3600.0;

/// Unit of a radius value given on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RadiusUnit {
    /// Degrees
    Degree,
    /// Arcminutes (1/60 degree)
    Arcmin,
    /// Arcseconds (1/3600 degree)
    Arcsec,
}

impl RadiusUnit {
    /// Convert a radius expressed in this unit to degrees
    pub fn to_degrees(&self, value: f64) -> f64 {
        match self {
            RadiusUnit::Degree => value,
            RadiusUnit::Arcmin => value * ARCMIN_TO_DEG,
            RadiusUnit::Arcsec => value * ARCSEC_TO_DEG,
        }
    }
}

impl std::fmt::Display for RadiusUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RadiusUnit::Degree => write!(f, "degree"),
            RadiusUnit::Arcmin => write!(f, "arcmin"),
            RadiusUnit::Arcsec => write!(f, "arcsec"),
        }
    }
}
