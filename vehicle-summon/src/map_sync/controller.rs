//! Map sync controller: decides when the map center follows the device.
//!
//! The first usable fix always recenters the map so the user starts centered
//! on themselves. Later fixes recenter only while follow mode is on; otherwise
//! the center reported by the map collaborator (user panning) wins.

use super::state::{SyncState, SyncUpdate};
use crate::coord::Coordinate;
use crate::location::{batch_span, smooth, LocationSample};

/// Owner of [`SyncState`]; the only component that mutates it.
#[derive(Debug, Clone)]
pub struct MapSyncController {
    state: SyncState,
}

impl Default for MapSyncController {
    fn default() -> Self {
        Self::new(false)
    }
}

impl MapSyncController {
    /// Create a controller for a new session.
    pub fn new(follow_enabled: bool) -> Self {
        Self {
            state: SyncState::new(follow_enabled),
        }
    }

    /// Handle one batch of raw samples from the platform.
    ///
    /// The batch is smoothed first; an origin or out-of-range result is
    /// discarded.
    pub fn on_samples_received(&mut self, samples: &[LocationSample]) -> SyncUpdate {
        let candidate = smooth(samples);
        tracing::trace!(
            samples = samples.len(),
            span_ms = batch_span(samples).as_millis() as u64,
            candidate = %candidate,
            "Sample batch smoothed"
        );
        self.apply_fix(candidate)
    }

    /// Apply a single authoritative fix without filtering.
    pub fn apply_fix(&mut self, candidate: Coordinate) -> SyncUpdate {
        if !candidate.is_usable_fix() {
            tracing::debug!(candidate = %candidate, "Discarding unusable fix");
            return SyncUpdate::NONE;
        }

        // Decided before the latch is released: the first fix always recenters
        let recenter = self.state.tracks_device();

        let mut update = SyncUpdate {
            device_moved: self.state.device_coordinate != candidate,
            ..SyncUpdate::NONE
        };
        self.state.device_coordinate = candidate;

        if self.state.first_load_pending {
            self.state.first_load_pending = false;
            update.first_fix = true;
            tracing::info!(
                latitude = candidate.latitude,
                longitude = candidate.longitude,
                "First fix acquired, centering map"
            );
        }

        if recenter {
            update.center_moved = self.state.map_center_coordinate != candidate;
            self.state.map_center_coordinate = candidate;
        }

        update
    }

    /// Record the center the map collaborator is currently displaying.
    ///
    /// Repeating the current value is a no-op.
    pub fn on_map_region_changed(&mut self, center: Coordinate) -> SyncUpdate {
        if self.state.map_center_coordinate == center {
            return SyncUpdate::NONE;
        }

        tracing::trace!(center = %center, "Map region changed");
        self.state.map_center_coordinate = center;
        SyncUpdate {
            center_moved: true,
            ..SyncUpdate::NONE
        }
    }

    /// Toggle follow mode. Takes effect on the next fix.
    pub fn set_follow_enabled(&mut self, enabled: bool) -> SyncUpdate {
        if self.state.follow_enabled == enabled {
            return SyncUpdate::NONE;
        }

        tracing::debug!(enabled, "Follow mode changed");
        self.state.follow_enabled = enabled;
        SyncUpdate {
            follow_changed: true,
            ..SyncUpdate::NONE
        }
    }

    /// Current state.
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Current map center.
    pub fn map_center(&self) -> Coordinate {
        self.state.map_center_coordinate
    }

    /// Current device coordinate.
    pub fn device_coordinate(&self) -> Coordinate {
        self.state.device_coordinate
    }

    /// Whether follow mode is on.
    pub fn follow_enabled(&self) -> bool {
        self.state.follow_enabled
    }

    /// Whether the first usable fix is still awaited.
    pub fn first_load_pending(&self) -> bool {
        self.state.first_load_pending
    }
}
