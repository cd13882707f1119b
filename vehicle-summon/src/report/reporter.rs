//! Network reporter: sends the summon coordinate to the vehicle.
//!
//! Sending is split in two steps so the session can keep the endpoint check
//! synchronous:
//!
//! 1. [`NetworkReporter::prepare`] validates the endpoint and encodes the
//!    body. A malformed endpoint fails here, before any network activity.
//! 2. [`NetworkReporter::deliver`] performs the POST and yields a
//!    [`NetworkResult`].

use reqwest::Url;
use serde::Serialize;

use super::client::{ReqwestTransport, SummonTransport};
use super::config::ReporterConfig;
use super::error::{ReportError, ReportErrorKind};
use crate::coord::Coordinate;

/// Wire payload: `{"coord":{"lat":..,"long":..}}`.
#[derive(Debug, Serialize)]
struct SummonPayload {
    coord: Coordinate,
}

/// A validated, encoded request ready for delivery.
#[derive(Debug, Clone)]
pub struct SummonRequest {
    /// Destination endpoint.
    pub url: Url,
    /// Encoded JSON body.
    pub body: Vec<u8>,
    /// Coordinate being reported.
    pub coordinate: Coordinate,
}

/// Outcome of one send attempt. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkResult {
    /// Whether the transport completed without error.
    pub success: bool,
    /// Failure cause when `success` is false.
    pub error: Option<ReportError>,
    /// Coordinate that was (or would have been) sent.
    pub coordinate: Coordinate,
}

impl NetworkResult {
    /// A successful send.
    pub fn succeeded(coordinate: Coordinate) -> Self {
        Self {
            success: true,
            error: None,
            coordinate,
        }
    }

    /// A failed send.
    pub fn failed(coordinate: Coordinate, error: ReportError) -> Self {
        Self {
            success: false,
            error: Some(error),
            coordinate,
        }
    }

    /// Classification of the failure, if any.
    pub fn error_kind(&self) -> Option<ReportErrorKind> {
        self.error.as_ref().map(ReportError::kind)
    }
}

/// Sends coordinates to a fixed, injected endpoint.
pub struct NetworkReporter<T: SummonTransport> {
    transport: T,
    endpoint: String,
}

impl NetworkReporter<ReqwestTransport> {
    /// Create a reporter backed by reqwest.
    pub fn from_config(config: &ReporterConfig) -> Result<Self, ReportError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Ok(Self::new(transport, config.endpoint.clone()))
    }
}

impl<T: SummonTransport> NetworkReporter<T> {
    /// Create a reporter with an explicit transport.
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// Configured endpoint, as given.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Validate the endpoint and encode the request body.
    pub fn prepare(&self, coordinate: Coordinate) -> Result<SummonRequest, ReportError> {
        let url = parse_endpoint(&self.endpoint)?;

        let body = serde_json::to_vec(&SummonPayload { coord: coordinate })
            .map_err(|e| ReportError::Transport(format!("Failed to encode request: {}", e)))?;

        Ok(SummonRequest {
            url,
            body,
            coordinate,
        })
    }

    /// Deliver a prepared request.
    pub async fn deliver(&self, request: SummonRequest) -> NetworkResult {
        let SummonRequest {
            url,
            body,
            coordinate,
        } = request;

        tracing::info!(
            url = %url,
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "Sending summon request"
        );

        match self.transport.post_json(&url, body).await {
            Ok(()) => {
                tracing::info!(coordinate = %coordinate, "Summon request sent");
                NetworkResult::succeeded(coordinate)
            }
            Err(e) => {
                tracing::warn!(error = %e, coordinate = %coordinate, "Summon request failed");
                NetworkResult::failed(coordinate, e)
            }
        }
    }

    /// Prepare and deliver in one call.
    pub async fn send(&self, coordinate: Coordinate) -> NetworkResult {
        match self.prepare(coordinate) {
            Ok(request) => self.deliver(request).await,
            Err(e) => {
                tracing::warn!(error = %e, "Summon request rejected before sending");
                NetworkResult::failed(coordinate, e)
            }
        }
    }
}

/// Parse and check the endpoint URL.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
fn parse_endpoint(endpoint: &str) -> Result<Url, ReportError> {
    let invalid = |reason: String| ReportError::InvalidEndpoint {
        url: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}
