//! Vehicle Summon - location reconciliation core for summoning a vehicle
//!
//! This library keeps a device's sensed position, a user-controlled follow
//! mode and the map's focal point consistent, and reports the focal point to
//! a vehicle endpoint over HTTP on demand.
//!
//! The host application supplies a [`location::LocationPlatform`] and drives a
//! [`session::SummonSession`] through its [`session::SessionHandle`]; the UI
//! reads published [`session::SessionSnapshot`]s.

pub mod config;
pub mod coord;
pub mod location;
pub mod logging;
pub mod map_sync;
pub mod report;
pub mod session;
