//! Reporting the summon coordinate to the vehicle over HTTP.
//!
//! The reporter POSTs `{"coord":{"lat":..,"long":..}}` to a fixed endpoint
//! and reports a [`NetworkResult`]. Only transport completion matters; the
//! response status and body are ignored.

mod client;
mod config;
mod error;
mod reporter;

pub use client::{ReqwestTransport, SummonTransport};
pub use config::{ReporterConfig, DEFAULT_ENDPOINT};
pub use error::{ReportError, ReportErrorKind};
pub use reporter::{NetworkReporter, NetworkResult, SummonRequest};

#[cfg(test)]
pub use client::tests::MockTransport;
