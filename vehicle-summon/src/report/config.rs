//! Configuration for the network reporter.

use std::time::Duration;

/// Default vehicle endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://192.168.99.5:8642";

/// Configuration for [`super::NetworkReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Base URL requests are POSTed to.
    ///
    /// Kept as a string so a malformed value surfaces as
    /// `ReportError::InvalidEndpoint` at send time.
    pub endpoint: String,

    /// Optional request timeout. `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl ReporterConfig {
    /// Create a config for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
