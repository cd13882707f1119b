//! Error types for location sensing and authorization handling.

use thiserror::Error;

/// Errors raised while reconciling location authorization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// Location is authorized but the platform has no last known fix.
    ///
    /// Not fatal: the session logs it and keeps requesting fixes.
    #[error("Location authorized but no last known fix is available")]
    PermissionUnusable,

    /// The platform reported an authorization status this build does not know.
    ///
    /// Fatal: the platform contract changed incompatibly.
    #[error("Unsupported authorization state (raw value {0})")]
    UnsupportedAuthorizationState(i64),
}

impl LocationError {
    /// Returns true if the session cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedAuthorizationState(_))
    }
}
