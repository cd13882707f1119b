//! Summon session: the single-consumer loop tying the core together.
//!
//! # Example
//!
//! ```ignore
//! use tokio_util::sync::CancellationToken;
//! use vehicle_summon::session::{SessionConfig, SummonSession};
//!
//! let (session, handle) = SummonSession::from_config(&SessionConfig::default(), platform)?;
//! let shutdown = CancellationToken::new();
//! tokio::spawn(session.run(shutdown.clone()));
//!
//! handle.samples_received(samples).await?;
//! let sent_to = handle.summon().await?;
//! ```

mod config;
mod error;
mod event;
mod handle;
mod runner;
mod snapshot;

pub use config::{SessionConfig, DEFAULT_EVENT_CHANNEL_CAPACITY};
pub use error::SessionError;
pub use event::SessionEvent;
pub use handle::SessionHandle;
pub use runner::SummonSession;
pub use snapshot::SessionSnapshot;
