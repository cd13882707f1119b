//! Error types for reporting a coordinate to the vehicle endpoint.

use thiserror::Error;

/// Coarse classification of a [`ReportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportErrorKind {
    /// The configured endpoint URL is unusable.
    InvalidEndpoint,
    /// The request did not complete at the transport level.
    Transport,
}

/// Errors that can occur when sending a summon request.
///
/// Both variants are surfaced to the user the same way; the distinction
/// exists for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The configured endpoint URL is malformed. Raised before any network
    /// activity.
    #[error("Invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    /// Transport-level failure (connection refused, DNS, TLS, reset, ...).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ReportError {
    /// Classification of this error.
    pub fn kind(&self) -> ReportErrorKind {
        match self {
            Self::InvalidEndpoint { .. } => ReportErrorKind::InvalidEndpoint,
            Self::Transport(_) => ReportErrorKind::Transport,
        }
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(e: reqwest::Error) -> Self {
        ReportError::Transport(e.to_string())
    }
}
