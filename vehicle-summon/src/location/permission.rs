//! Permission state machine for location authorization.
//!
//! Authorization changes and acquisition failures both funnel into
//! [`PermissionStateMachine::reconcile`], which re-derives what to do from the
//! current status instead of treating failures as a separate error channel.
//!
//! # Transitions
//!
//! ```text
//! Authorized    --> prompt hidden, immediate fix from last known, AcquireLocation
//! Undetermined  --> AcquireLocation + RequestAuthorization, prompt unchanged
//! Denied        --> prompt shown, no requests
//! Restricted    --> prompt shown, no requests
//! Unrecognized  --> fatal (UnsupportedAuthorizationState)
//! ```

use super::error::LocationError;
use super::platform::{AuthorizationStatus, LocationPlatform, PlatformRequest};
use crate::coord::Coordinate;

/// Outcome of reconciling one authorization status.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionDecision {
    /// Status that was reconciled.
    pub status: AuthorizationStatus,
    /// New prompt visibility, or `None` to leave it unchanged.
    pub prompt_visible: Option<bool>,
    /// Requests issued to the platform, in order.
    pub requests: Vec<PlatformRequest>,
    /// Authoritative fix to apply without filtering.
    pub immediate_fix: Option<Coordinate>,
    /// Non-fatal problem detected while reconciling.
    pub issue: Option<LocationError>,
}

impl PermissionDecision {
    /// Derive the decision for a status.
    ///
    /// `last_known` is only consulted for [`AuthorizationStatus::Authorized`].
    pub fn derive<F>(status: AuthorizationStatus, last_known: F) -> Result<Self, LocationError>
    where
        F: FnOnce() -> Option<Coordinate>,
    {
        if let AuthorizationStatus::Unrecognized(code) = status {
            return Err(LocationError::UnsupportedAuthorizationState(code));
        }

        let mut requests = Vec::new();
        if status.allows_acquisition() {
            // Keep the sensor stream warm even without a cached fix
            requests.push(PlatformRequest::AcquireLocation);
        }

        let decision = match status {
            AuthorizationStatus::Authorized => {
                let fix = last_known();
                Self {
                    status,
                    prompt_visible: Some(false),
                    requests,
                    immediate_fix: fix,
                    issue: fix.is_none().then_some(LocationError::PermissionUnusable),
                }
            }
            AuthorizationStatus::Undetermined => {
                requests.push(PlatformRequest::RequestAuthorization);
                Self {
                    status,
                    prompt_visible: None,
                    requests,
                    immediate_fix: None,
                    issue: None,
                }
            }
            AuthorizationStatus::Denied
            | AuthorizationStatus::Restricted
            | AuthorizationStatus::Unrecognized(_) => Self {
                status,
                prompt_visible: Some(true),
                requests,
                immediate_fix: None,
                issue: None,
            },
        };

        Ok(decision)
    }
}

/// Tracks the last reconciled authorization status and the settings prompt.
#[derive(Debug, Default)]
pub struct PermissionStateMachine {
    status: Option<AuthorizationStatus>,
    prompt_visible: bool,
}

impl PermissionStateMachine {
    /// Create a state machine that has not reconciled anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile a status: update the prompt flag and issue platform requests.
    ///
    /// The caller is responsible for applying `immediate_fix` to the map
    /// controller. An `Err` is always fatal.
    pub fn reconcile<P: LocationPlatform>(
        &mut self,
        status: AuthorizationStatus,
        platform: &P,
    ) -> Result<PermissionDecision, LocationError> {
        let decision = PermissionDecision::derive(status, || platform.last_known_location())?;

        self.status = Some(status);
        if let Some(visible) = decision.prompt_visible {
            self.prompt_visible = visible;
        }

        for request in &decision.requests {
            platform.perform(*request);
        }

        tracing::debug!(
            status = %status,
            prompt_visible = self.prompt_visible,
            requests = ?decision.requests,
            has_fix = decision.immediate_fix.is_some(),
            "Authorization reconciled"
        );

        Ok(decision)
    }

    /// Hide the settings prompt after the user dismissed it.
    ///
    /// The next reconcile of a blocked status shows it again.
    pub fn dismiss_prompt(&mut self) {
        self.prompt_visible = false;
    }

    /// Whether the "go to settings" prompt should be visible.
    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }

    /// Last reconciled status, if any.
    pub fn status(&self) -> Option<AuthorizationStatus> {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::super::platform::tests::MockPlatform;
    use super::*;

    const LONDON: Coordinate = Coordinate::new(51.5, -0.13);

    #[test]
    fn test_authorized_with_last_known_fix() {
        let platform = MockPlatform::new(AuthorizationStatus::Authorized, Some(LONDON));
        let mut sm = PermissionStateMachine::new();

        let decision = sm
            .reconcile(AuthorizationStatus::Authorized, &platform)
            .unwrap();

        assert_eq!(decision.immediate_fix, Some(LONDON));
        assert!(decision.issue.is_none());
        assert!(!sm.prompt_visible());
        assert_eq!(platform.requests(), vec![PlatformRequest::AcquireLocation]);
    }

    #[test]
    fn test_authorized_without_fix_is_not_fatal() {
        let platform = MockPlatform::new(AuthorizationStatus::Authorized, None);
        let mut sm = PermissionStateMachine::new();

        let decision = sm
            .reconcile(AuthorizationStatus::Authorized, &platform)
            .unwrap();

        assert_eq!(decision.issue, Some(LocationError::PermissionUnusable));
        assert!(decision.immediate_fix.is_none());
        assert_eq!(platform.requests(), vec![PlatformRequest::AcquireLocation]);
    }

    #[test]
    fn test_undetermined_requests_fix_and_authorization() {
        let platform = MockPlatform::new(AuthorizationStatus::Undetermined, Some(LONDON));
        let mut sm = PermissionStateMachine::new();

        let decision = sm
            .reconcile(AuthorizationStatus::Undetermined, &platform)
            .unwrap();

        assert_eq!(decision.prompt_visible, None);
        assert!(decision.immediate_fix.is_none());
        assert_eq!(
            platform.requests(),
            vec![
                PlatformRequest::AcquireLocation,
                PlatformRequest::RequestAuthorization
            ]
        );
    }

    #[test]
    fn test_undetermined_leaves_prompt_unchanged() {
        let platform = MockPlatform::new(AuthorizationStatus::Denied, None);
        let mut sm = PermissionStateMachine::new();

        sm.reconcile(AuthorizationStatus::Denied, &platform).unwrap();
        assert!(sm.prompt_visible());

        sm.reconcile(AuthorizationStatus::Undetermined, &platform)
            .unwrap();
        assert!(sm.prompt_visible());
    }

    #[test]
    fn test_denied_shows_prompt_without_requests() {
        let platform = MockPlatform::new(AuthorizationStatus::Denied, Some(LONDON));
        let mut sm = PermissionStateMachine::new();

        let decision = sm.reconcile(AuthorizationStatus::Denied, &platform).unwrap();

        assert!(sm.prompt_visible());
        assert!(decision.requests.is_empty());
        assert!(platform.requests().is_empty());
        assert!(decision.immediate_fix.is_none());
    }

    #[test]
    fn test_restricted_shows_prompt() {
        let platform = MockPlatform::new(AuthorizationStatus::Restricted, None);
        let mut sm = PermissionStateMachine::new();

        sm.reconcile(AuthorizationStatus::Restricted, &platform)
            .unwrap();

        assert!(sm.prompt_visible());
        assert!(platform.requests().is_empty());
    }

    #[test]
    fn test_authorized_after_denied_hides_prompt() {
        let platform = MockPlatform::new(AuthorizationStatus::Denied, Some(LONDON));
        let mut sm = PermissionStateMachine::new();

        sm.reconcile(AuthorizationStatus::Denied, &platform).unwrap();
        sm.reconcile(AuthorizationStatus::Authorized, &platform)
            .unwrap();

        assert!(!sm.prompt_visible());
        assert_eq!(sm.status(), Some(AuthorizationStatus::Authorized));
    }

    #[test]
    fn test_unrecognized_is_fatal() {
        let platform = MockPlatform::new(AuthorizationStatus::Unrecognized(99), None);
        let mut sm = PermissionStateMachine::new();

        let err = sm
            .reconcile(AuthorizationStatus::Unrecognized(99), &platform)
            .unwrap_err();

        assert_eq!(err, LocationError::UnsupportedAuthorizationState(99));
        assert!(err.is_fatal());
        assert!(platform.requests().is_empty());
        assert_eq!(sm.status(), None);
    }

    #[test]
    fn test_dismiss_prompt() {
        let platform = MockPlatform::new(AuthorizationStatus::Denied, None);
        let mut sm = PermissionStateMachine::new();

        sm.reconcile(AuthorizationStatus::Denied, &platform).unwrap();
        sm.dismiss_prompt();
        assert!(!sm.prompt_visible());

        // Still denied on the next reconcile: prompt comes back
        sm.reconcile(AuthorizationStatus::Denied, &platform).unwrap();
        assert!(sm.prompt_visible());
    }

    #[test]
    fn test_last_known_only_read_when_authorized() {
        let decision = PermissionDecision::derive(AuthorizationStatus::Denied, || {
            panic!("last known fix must not be queried when denied")
        })
        .unwrap();
        assert_eq!(decision.prompt_visible, Some(true));
    }

    #[test]
    fn test_acquisition_requested_only_when_allowed() {
        let statuses = [
            AuthorizationStatus::Authorized,
            AuthorizationStatus::Undetermined,
            AuthorizationStatus::Denied,
            AuthorizationStatus::Restricted,
        ];

        for status in statuses {
            let decision = PermissionDecision::derive(status, || Some(LONDON)).unwrap();
            assert_eq!(
                decision.requests.contains(&PlatformRequest::AcquireLocation),
                status.allows_acquisition(),
                "status {}",
                status
            );
        }
    }
}
