//! Map sync: reconciles device position, map center and follow mode.
//!
//! # Example
//!
//! ```
//! use vehicle_summon::coord::Coordinate;
//! use vehicle_summon::location::LocationSample;
//! use vehicle_summon::map_sync::MapSyncController;
//!
//! let mut controller = MapSyncController::new(false);
//!
//! // First fix always centers the map
//! controller.on_samples_received(&[LocationSample::new(51.5, -0.13)]);
//! assert_eq!(controller.map_center(), Coordinate::new(51.5, -0.13));
//!
//! // The user pans; later fixes leave the center alone
//! controller.on_map_region_changed(Coordinate::new(51.51, -0.12));
//! controller.on_samples_received(&[LocationSample::new(51.52, -0.14)]);
//! assert_eq!(controller.map_center(), Coordinate::new(51.51, -0.12));
//! ```

mod controller;
mod state;

pub use controller::MapSyncController;
pub use state::{SyncState, SyncUpdate};
