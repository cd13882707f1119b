//! Runtime configuration for a summon session.

use std::time::Duration;

use crate::report::ReporterConfig;

/// Default capacity of the session event channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for [`super::SummonSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Start with follow mode on.
    pub follow_on_start: bool,

    /// Bounded capacity of the event channel.
    pub event_channel_capacity: usize,

    /// Network reporter settings.
    pub reporter: ReporterConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            follow_on_start: false,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
            reporter: ReporterConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the initial follow mode.
    pub fn with_follow_on_start(mut self, follow: bool) -> Self {
        self.follow_on_start = follow;
        self
    }

    /// Set the event channel capacity. Zero is raised to one.
    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity.max(1);
        self
    }

    /// Set the vehicle endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.reporter.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.reporter.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DEFAULT_ENDPOINT;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert!(!config.follow_on_start);
        assert_eq!(config.event_channel_capacity, DEFAULT_EVENT_CHANNEL_CAPACITY);
        assert_eq!(config.reporter.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_builders() {
        let config = SessionConfig::default()
            .with_follow_on_start(true)
            .with_event_channel_capacity(0)
            .with_endpoint("http://10.0.0.7:8000")
            .with_request_timeout(Duration::from_secs(3));

        assert!(config.follow_on_start);
        assert_eq!(config.event_channel_capacity, 1);
        assert_eq!(config.reporter.endpoint, "http://10.0.0.7:8000");
        assert_eq!(config.reporter.timeout, Some(Duration::from_secs(3)));
    }
}
