//! Inputs to the session loop.

use tokio::sync::oneshot;

use crate::coord::Coordinate;
use crate::location::{AuthorizationStatus, LocationSample};

/// Everything the session reacts to.
///
/// Platform callbacks and UI actions are both delivered as events on a single
/// channel so state is only ever mutated by the session task.
#[derive(Debug)]
pub enum SessionEvent {
    /// The host reported a new authorization status.
    AuthorizationChanged(AuthorizationStatus),

    /// The host failed to produce a fix.
    AcquisitionFailed(String),

    /// A batch of raw fixes arrived.
    SamplesReceived(Vec<LocationSample>),

    /// The map collaborator now displays this center.
    MapRegionChanged(Coordinate),

    /// The user toggled follow mode.
    FollowToggled(bool),

    /// The user asked to summon the vehicle to the current map center.
    ///
    /// The center is read when this event is processed, after every event
    /// queued before it, and the coordinate sent is returned on `reply`.
    SendRequested {
        reply: Option<oneshot::Sender<Coordinate>>,
    },

    /// The user dismissed the network success/error alert.
    NetworkOutcomeDismissed,

    /// The user dismissed the "go to settings" prompt.
    PermissionPromptDismissed,
}

impl SessionEvent {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuthorizationChanged(_) => "authorization_changed",
            Self::AcquisitionFailed(_) => "acquisition_failed",
            Self::SamplesReceived(_) => "samples_received",
            Self::MapRegionChanged(_) => "map_region_changed",
            Self::FollowToggled(_) => "follow_toggled",
            Self::SendRequested { .. } => "send_requested",
            Self::NetworkOutcomeDismissed => "network_outcome_dismissed",
            Self::PermissionPromptDismissed => "permission_prompt_dismissed",
        }
    }
}
