//! Location sensing: sample filtering and authorization handling.
//!
//! # Components
//!
//! - [`filter`] - reduces a burst of raw fixes to one smoothed coordinate
//! - [`permission`] - reacts to authorization status and decides platform requests
//! - [`platform`] - the [`LocationPlatform`] trait the host implements
//!
//! ```text
//! Platform ──samples──► filter::smooth ──► MapSyncController
//!    ▲                                          ▲
//!    └──requests── PermissionStateMachine ──────┘ (immediate fix)
//! ```

mod error;
pub mod filter;
mod permission;
mod platform;

pub use error::LocationError;
pub use filter::{batch_span, smooth, smooth_coordinates, LocationSample};
pub use permission::{PermissionDecision, PermissionStateMachine};
pub use platform::{AuthorizationStatus, LocationPlatform, PlatformRequest};

#[cfg(test)]
pub use platform::tests::MockPlatform;
