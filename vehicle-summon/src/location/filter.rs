//! Coordinate filter for raw sensor sample batches.
//!
//! The platform delivers fixes in bursts. Each burst is reduced to a single
//! estimate with a recency-weighted blend:
//!
//! ```text
//! acc₀ = (0, 0)
//! accₙ = sampleₙ + accₙ₋₁ / 2
//! ```
//!
//! The blend must stay bit-compatible with deployed clients, so the
//! accumulator starts at the origin and every batch starts fresh. An empty
//! batch yields the origin sentinel, which callers treat as "no update".

use std::time::{Duration, Instant};

use crate::coord::Coordinate;

/// A single raw position fix reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationSample {
    /// Reported position.
    pub coordinate: Coordinate,
    /// When the platform produced this fix. Does not affect smoothing.
    pub timestamp: Instant,
}

impl LocationSample {
    /// Create a sample stamped with the current time.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinate: Coordinate::new(latitude, longitude),
            timestamp: Instant::now(),
        }
    }

    /// Create a sample with explicit timestamp.
    pub fn with_timestamp(coordinate: Coordinate, timestamp: Instant) -> Self {
        Self {
            coordinate,
            timestamp,
        }
    }
}

impl From<Coordinate> for LocationSample {
    fn from(coordinate: Coordinate) -> Self {
        Self::with_timestamp(coordinate, Instant::now())
    }
}

/// Reduce one sample batch to a smoothed coordinate.
///
/// Samples are folded in arrival order; each new sample halves the weight of
/// everything accumulated before it.
pub fn smooth(samples: &[LocationSample]) -> Coordinate {
    smooth_coordinates(samples.iter().map(|s| s.coordinate))
}

/// Time between the first and last sample of a batch.
///
/// Zero for empty or single-sample batches, and for out-of-order stamps.
pub fn batch_span(samples: &[LocationSample]) -> Duration {
    match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => last.timestamp.saturating_duration_since(first.timestamp),
        _ => Duration::ZERO,
    }
}

/// Same as [`smooth`] for bare coordinates.
pub fn smooth_coordinates<I>(coordinates: I) -> Coordinate
where
    I: IntoIterator<Item = Coordinate>,
{
    coordinates
        .into_iter()
        .fold(Coordinate::ORIGIN, |acc, sample| Coordinate {
            latitude: sample.latitude + acc.latitude / 2.0,
            longitude: sample.longitude + acc.longitude / 2.0,
        })
}
