//! Published, read-only view of session state.

use crate::coord::Coordinate;
use crate::location::AuthorizationStatus;
use crate::map_sync::SyncState;
use crate::report::NetworkResult;

/// Immutable copy of everything the UI collaborator reads.
///
/// The three alert flags are derived, never stored independently:
/// `network_error_visible` and `send_succeeded_visible` come from the latest
/// network outcome and are therefore mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Device position, map center, follow flag and first-load latch.
    pub sync: SyncState,
    /// Last reconciled authorization status.
    pub authorization: Option<AuthorizationStatus>,
    /// The "go to settings" prompt should be shown.
    pub permission_prompt_visible: bool,
    /// The last send failed and its alert has not been dismissed.
    pub network_error_visible: bool,
    /// The last send succeeded and its alert has not been dismissed.
    pub send_succeeded_visible: bool,
    /// Description of the last send failure.
    pub last_error: Option<String>,
    /// Coordinate of the last send attempt.
    pub last_sent_coordinate: Option<Coordinate>,
}

impl SessionSnapshot {
    /// Snapshot before any event has been processed.
    pub fn initial(sync: SyncState) -> Self {
        Self {
            sync,
            authorization: None,
            permission_prompt_visible: false,
            network_error_visible: false,
            send_succeeded_visible: false,
            last_error: None,
            last_sent_coordinate: None,
        }
    }

    pub(crate) fn capture(
        sync: SyncState,
        authorization: Option<AuthorizationStatus>,
        permission_prompt_visible: bool,
        outcome: Option<&NetworkResult>,
    ) -> Self {
        Self {
            sync,
            authorization,
            permission_prompt_visible,
            network_error_visible: outcome.is_some_and(|r| !r.success),
            send_succeeded_visible: outcome.is_some_and(|r| r.success),
            last_error: outcome
                .and_then(|r| r.error.as_ref())
                .map(ToString::to_string),
            last_sent_coordinate: outcome.map(|r| r.coordinate),
        }
    }

    /// Current map center.
    pub fn map_center(&self) -> Coordinate {
        self.sync.map_center_coordinate
    }

    /// Current device coordinate.
    pub fn device_coordinate(&self) -> Coordinate {
        self.sync.device_coordinate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportError;

    #[test]
    fn test_flags_from_outcome() {
        let sync = SyncState::default();
        let at = Coordinate::new(1.0, 2.0);

        let none = SessionSnapshot::capture(sync, None, false, None);
        assert!(!none.network_error_visible);
        assert!(!none.send_succeeded_visible);
        assert_eq!(none, SessionSnapshot::initial(sync));

        let ok = SessionSnapshot::capture(sync, None, false, Some(&NetworkResult::succeeded(at)));
        assert!(ok.send_succeeded_visible);
        assert!(!ok.network_error_visible);
        assert_eq!(ok.last_sent_coordinate, Some(at));
        assert!(ok.last_error.is_none());

        let failed = NetworkResult::failed(at, ReportError::Transport("refused".to_string()));
        let err = SessionSnapshot::capture(sync, None, false, Some(&failed));
        assert!(err.network_error_visible);
        assert!(!err.send_succeeded_visible);
        assert_eq!(err.last_error.as_deref(), Some("Transport error: refused"));
    }
}
