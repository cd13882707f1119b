//! HTTP transport abstraction for testability.

use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use super::error::ReportError;

/// Transport used to deliver an encoded summon request.
///
/// Success means the exchange completed without a transport-level error.
/// Response status and body are not inspected.
pub trait SummonTransport: Send + Sync {
    /// POST a JSON body to `url`.
    fn post_json(
        &self,
        url: &Url,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<(), ReportError>> + Send;
}

/// Real transport using a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport. `timeout` of `None` keeps reqwest's defaults.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ReportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| ReportError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

impl SummonTransport for ReqwestTransport {
    async fn post_json(&self, url: &Url, body: Vec<u8>) -> Result<(), ReportError> {
        let response = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            "Summon request delivered"
        );

        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Transport double that records every request.
    #[derive(Clone)]
    pub struct MockTransport {
        response: Result<(), ReportError>,
        requests: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    }

    impl MockTransport {
        pub fn succeeding() -> Self {
            Self {
                response: Ok(()),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                response: Err(ReportError::Transport(message.to_string())),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn requests(&self) -> Vec<(String, Vec<u8>)> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl SummonTransport for MockTransport {
        async fn post_json(&self, url: &Url, body: Vec<u8>) -> Result<(), ReportError> {
            self.requests
                .lock()
                .unwrap()
                .push((url.to_string(), body));
            self.response.clone()
        }
    }

    #[test]
    fn test_reqwest_transport_creation() {
        assert!(ReqwestTransport::new(None).is_ok());
        assert!(ReqwestTransport::new(Some(Duration::from_secs(5))).is_ok());
    }

    #[tokio::test]
    async fn test_mock_transport_records() {
        let mock = MockTransport::succeeding();
        let url = Url::parse("http://vehicle.local:8642").unwrap();

        mock.post_json(&url, b"{}".to_vec()).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "http://vehicle.local:8642/");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let transport = ReqwestTransport::new(Some(Duration::from_secs(5))).unwrap();
        // Reserve a free port, then release it so nothing is listening
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{}", port)).unwrap();

        let result = transport.post_json(&url, b"{}".to_vec()).await;
        assert!(matches!(result, Err(ReportError::Transport(_))));
    }
}
