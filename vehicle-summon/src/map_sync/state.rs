//! State records owned by the map sync controller.

use crate::coord::Coordinate;

/// Mutable synchronization state for one session.
///
/// # Invariants
///
/// - `first_load_pending` starts `true` and flips to `false` exactly once.
/// - While `first_load_pending || follow_enabled`, `map_center_coordinate`
///   equals `device_coordinate` after every accepted fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncState {
    /// Latest accepted device position.
    pub device_coordinate: Coordinate,
    /// Current map focal point.
    pub map_center_coordinate: Coordinate,
    /// Whether the map center tracks the device.
    pub follow_enabled: bool,
    /// True until the first usable fix has been observed.
    pub first_load_pending: bool,
}

impl SyncState {
    /// Fresh state with origin coordinates.
    pub fn new(follow_enabled: bool) -> Self {
        Self {
            device_coordinate: Coordinate::ORIGIN,
            map_center_coordinate: Coordinate::ORIGIN,
            follow_enabled,
            first_load_pending: true,
        }
    }

    /// Whether an accepted fix should move the map center.
    pub fn tracks_device(&self) -> bool {
        self.first_load_pending || self.follow_enabled
    }
}

impl Default for SyncState {
    fn default() -> Self {
        Self::new(false)
    }
}

/// What a controller operation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncUpdate {
    /// Device coordinate changed.
    pub device_moved: bool,
    /// Map center changed.
    pub center_moved: bool,
    /// The first-load latch was released by this operation.
    pub first_fix: bool,
    /// Follow mode flag changed.
    pub follow_changed: bool,
}

impl SyncUpdate {
    /// No change at all.
    pub const NONE: Self = Self {
        device_moved: false,
        center_moved: false,
        first_fix: false,
        follow_changed: false,
    };

    /// Returns true if anything observable changed.
    pub fn is_changed(&self) -> bool {
        self.device_moved || self.center_moved || self.first_fix || self.follow_changed
    }
}
