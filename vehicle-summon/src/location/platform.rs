//! Host platform seam for location sensing.
//!
//! The host owns the location subsystem. The core only observes its
//! authorization status and asks it to do things; fixes and failures come
//! back asynchronously as session events.

use crate::coord::Coordinate;

/// Location authorization status as reported by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    Undetermined,
    /// Location use is allowed (while in use or always).
    Authorized,
    /// The user declined location access.
    Denied,
    /// Location access is blocked by policy (parental controls, MDM, ...).
    Restricted,
    /// A status value this build does not understand.
    Unrecognized(i64),
}

impl AuthorizationStatus {
    /// Map a raw platform status code.
    ///
    /// Codes follow the common mobile convention: 0 = not determined,
    /// 1 = restricted, 2 = denied, 3 = authorized always,
    /// 4 = authorized when in use. Anything else is [`Self::Unrecognized`].
    pub fn from_raw(code: i64) -> Self {
        match code {
            0 => Self::Undetermined,
            1 => Self::Restricted,
            2 => Self::Denied,
            3 | 4 => Self::Authorized,
            other => Self::Unrecognized(other),
        }
    }

    /// Returns true if fixes can be requested in this status.
    pub fn allows_acquisition(&self) -> bool {
        matches!(self, Self::Authorized | Self::Undetermined)
    }
}

impl std::fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Undetermined => write!(f, "Undetermined"),
            Self::Authorized => write!(f, "Authorized"),
            Self::Denied => write!(f, "Denied"),
            Self::Restricted => write!(f, "Restricted"),
            Self::Unrecognized(code) => write!(f, "Unrecognized({})", code),
        }
    }
}

/// Follow-up request the core asks the platform to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformRequest {
    /// Acquire a fresh one-shot fix.
    AcquireLocation,
    /// Show the system authorization prompt.
    RequestAuthorization,
}

/// Interface the host location subsystem implements.
///
/// Methods are synchronous and must not block; results arrive later as
/// session events (`SamplesReceived`, `AcquisitionFailed`,
/// `AuthorizationChanged`).
pub trait LocationPlatform: Send + 'static {
    /// Current authorization status.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Most recent fix the platform has cached, if any.
    fn last_known_location(&self) -> Option<Coordinate>;

    /// Ask for a one-shot location fix.
    fn request_location(&self);

    /// Ask the user for location authorization.
    fn request_authorization(&self);

    /// Perform a [`PlatformRequest`].
    fn perform(&self, request: PlatformRequest) {
        match request {
            PlatformRequest::AcquireLocation => self.request_location(),
            PlatformRequest::RequestAuthorization => self.request_authorization(),
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Recording platform double.
    ///
    /// Clones share state so tests can inspect requests after handing a clone
    /// to the session.
    #[derive(Clone, Default)]
    pub struct MockPlatform {
        inner: Arc<Mutex<MockPlatformState>>,
    }

    #[derive(Default)]
    struct MockPlatformState {
        status: Option<AuthorizationStatus>,
        last_known: Option<Coordinate>,
        requests: Vec<PlatformRequest>,
    }

    impl MockPlatform {
        pub fn new(status: AuthorizationStatus, last_known: Option<Coordinate>) -> Self {
            let platform = Self::default();
            {
                let mut state = platform.inner.lock().unwrap();
                state.status = Some(status);
                state.last_known = last_known;
            }
            platform
        }

        pub fn set_status(&self, status: AuthorizationStatus) {
            self.inner.lock().unwrap().status = Some(status);
        }

        pub fn requests(&self) -> Vec<PlatformRequest> {
            self.inner.lock().unwrap().requests.clone()
        }
    }

    impl LocationPlatform for MockPlatform {
        fn authorization_status(&self) -> AuthorizationStatus {
            self.inner
                .lock()
                .unwrap()
                .status
                .unwrap_or(AuthorizationStatus::Undetermined)
        }

        fn last_known_location(&self) -> Option<Coordinate> {
            self.inner.lock().unwrap().last_known
        }

        fn request_location(&self) {
            self.inner
                .lock()
                .unwrap()
                .requests
                .push(PlatformRequest::AcquireLocation);
        }

        fn request_authorization(&self) {
            self.inner
                .lock()
                .unwrap()
                .requests
                .push(PlatformRequest::RequestAuthorization);
        }
    }

    #[test]
    fn test_from_raw_codes() {
        assert_eq!(AuthorizationStatus::from_raw(0), AuthorizationStatus::Undetermined);
        assert_eq!(AuthorizationStatus::from_raw(1), AuthorizationStatus::Restricted);
        assert_eq!(AuthorizationStatus::from_raw(2), AuthorizationStatus::Denied);
        assert_eq!(AuthorizationStatus::from_raw(3), AuthorizationStatus::Authorized);
        assert_eq!(AuthorizationStatus::from_raw(4), AuthorizationStatus::Authorized);
        assert_eq!(
            AuthorizationStatus::from_raw(9),
            AuthorizationStatus::Unrecognized(9)
        );
    }

    #[test]
    fn test_allows_acquisition() {
        assert!(AuthorizationStatus::Authorized.allows_acquisition());
        assert!(AuthorizationStatus::Undetermined.allows_acquisition());
        assert!(!AuthorizationStatus::Denied.allows_acquisition());
        assert!(!AuthorizationStatus::Restricted.allows_acquisition());
        assert!(!AuthorizationStatus::Unrecognized(5).allows_acquisition());
    }

    #[test]
    fn test_perform_dispatches() {
        let platform = MockPlatform::new(AuthorizationStatus::Authorized, None);
        platform.perform(PlatformRequest::RequestAuthorization);
        platform.perform(PlatformRequest::AcquireLocation);
        assert_eq!(
            platform.requests(),
            vec![
                PlatformRequest::RequestAuthorization,
                PlatformRequest::AcquireLocation
            ]
        );
    }
}
