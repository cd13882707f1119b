//! Geographic coordinate type shared by every component.
//!
//! # Origin Sentinel
//!
//! The all-zero coordinate `(0, 0)` is reserved to mean "no fix obtained
//! yet". A legitimate equatorial/prime-meridian fix is indistinguishable from
//! it and is treated as unset. The convention is kept for compatibility with
//! existing vehicle endpoints and clients.

use serde::{Deserialize, Serialize};

/// Minimum valid latitude in degrees.
pub const MIN_LATITUDE: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LATITUDE: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LONGITUDE: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LONGITUDE: f64 = 180.0;

/// A WGS84 position in decimal degrees.
///
/// Serializes as `{"lat": .., "long": ..}`, the shape vehicle endpoints expect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90).
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180).
    #[serde(rename = "long")]
    pub longitude: f64,
}

impl Coordinate {
    /// The origin sentinel, meaning "unset".
    pub const ORIGIN: Self = Self {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Create a new coordinate.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if this is the origin sentinel.
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Returns true if both components are finite and within WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }

    /// Returns true if this coordinate can be accepted as a position fix.
    ///
    /// A fix must be valid and must not be the origin sentinel.
    pub fn is_usable_fix(&self) -> bool {
        self.is_valid() && !self.is_origin()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
