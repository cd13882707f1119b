//! Session error types.

use thiserror::Error;

use crate::location::LocationError;
use crate::report::ReportError;

/// Errors returned by the session or its handles.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Unrecoverable location error. The session loop has stopped.
    #[error("Fatal location error: {0}")]
    Fatal(#[from] LocationError),

    /// The reporter could not be constructed.
    #[error("Failed to create network reporter: {0}")]
    Reporter(#[from] ReportError),

    /// The session loop is no longer running.
    #[error("Session is closed")]
    Closed,
}
