//! The session loop.
//!
//! [`SummonSession`] owns the map sync controller, the permission state
//! machine and the latest network outcome. It runs as a single task and is
//! the only place that state is mutated.
//!
//! # Architecture
//!
//! ```text
//!  platform callbacks ─┐
//!                      ├─► SessionEvent ──► SummonSession ──► watch<SessionSnapshot>
//!  UI actions ─────────┘                      │      ▲
//!                                             │      │ NetworkResult
//!                                  spawn send ▼      │
//!                                       NetworkReporter
//! ```
//!
//! Sends run as independent tasks and report back over an internal channel,
//! so a slow endpoint never blocks sensor updates.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::config::SessionConfig;
use super::error::SessionError;
use super::event::SessionEvent;
use super::handle::SessionHandle;
use super::snapshot::SessionSnapshot;
use crate::coord::Coordinate;
use crate::location::{AuthorizationStatus, LocationPlatform, PermissionStateMachine};
use crate::map_sync::MapSyncController;
use crate::report::{NetworkReporter, NetworkResult, ReqwestTransport, SummonTransport};

/// What woke the loop up.
enum Step {
    Shutdown,
    Event(Option<SessionEvent>),
    SendCompleted(NetworkResult),
}

/// A running vehicle summon session.
///
/// # Type Parameters
///
/// * `P` - Host location platform
/// * `T` - HTTP transport used by the reporter
pub struct SummonSession<P, T>
where
    P: LocationPlatform,
    T: SummonTransport + 'static,
{
    controller: MapSyncController,
    permission: PermissionStateMachine,
    platform: P,
    reporter: Arc<NetworkReporter<T>>,

    /// Latest send outcome; cleared on dismissal.
    outcome: Option<NetworkResult>,

    event_rx: mpsc::Receiver<SessionEvent>,
    completion_tx: mpsc::UnboundedSender<NetworkResult>,
    completion_rx: mpsc::UnboundedReceiver<NetworkResult>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<P: LocationPlatform> SummonSession<P, ReqwestTransport> {
    /// Create a session that reports over HTTP with reqwest.
    pub fn from_config(
        config: &SessionConfig,
        platform: P,
    ) -> Result<(Self, SessionHandle), SessionError> {
        let reporter = NetworkReporter::from_config(&config.reporter)?;
        Ok(Self::new(config, platform, reporter))
    }
}

impl<P, T> SummonSession<P, T>
where
    P: LocationPlatform,
    T: SummonTransport + 'static,
{
    /// Create a session and the handle used to feed it.
    ///
    /// Nothing happens until [`Self::run`] is polled.
    pub fn new(
        config: &SessionConfig,
        platform: P,
        reporter: NetworkReporter<T>,
    ) -> (Self, SessionHandle) {
        let controller = MapSyncController::new(config.follow_on_start);
        let (event_tx, event_rx) = mpsc::channel(config.event_channel_capacity.max(1));
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) =
            watch::channel(SessionSnapshot::initial(*controller.state()));

        let session = Self {
            controller,
            permission: PermissionStateMachine::new(),
            platform,
            reporter: Arc::new(reporter),
            outcome: None,
            event_rx,
            completion_tx,
            completion_rx,
            snapshot_tx,
        };

        (session, SessionHandle::new(event_tx, snapshot_rx))
    }

    /// Run until shutdown is signalled or every handle has been dropped.
    ///
    /// The current authorization status is reconciled once on start. Returns
    /// [`SessionError::Fatal`] if the platform reports a status this build
    /// does not understand.
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<(), SessionError> {
        info!(
            endpoint = self.reporter.endpoint(),
            follow = self.controller.follow_enabled(),
            "Summon session starting"
        );

        let initial = self.platform.authorization_status();
        if let Err(e) = self.reconcile(initial) {
            error!(error = %e, "Summon session aborted");
            return Err(e);
        }
        self.publish();

        loop {
            let step = tokio::select! {
                biased;

                _ = shutdown.cancelled() => Step::Shutdown,

                event = self.event_rx.recv() => Step::Event(event),

                Some(result) = self.completion_rx.recv() => Step::SendCompleted(result),
            };

            match step {
                Step::Shutdown => {
                    info!("Summon session shutting down");
                    break;
                }
                Step::Event(None) => {
                    info!("All session handles dropped");
                    break;
                }
                Step::Event(Some(event)) => match self.handle_event(event) {
                    Ok(true) => self.publish(),
                    Ok(false) => {}
                    Err(e) => {
                        error!(error = %e, "Summon session aborted");
                        return Err(e);
                    }
                },
                Step::SendCompleted(result) => {
                    self.on_send_completed(result);
                    self.publish();
                }
            }
        }

        info!("Summon session stopped");
        Ok(())
    }

    /// Apply one event. Returns whether a new snapshot should be published.
    fn handle_event(&mut self, event: SessionEvent) -> Result<bool, SessionError> {
        debug!(event = event.name(), "Processing session event");

        let changed = match event {
            SessionEvent::AuthorizationChanged(status) => {
                self.reconcile(status)?;
                true
            }
            SessionEvent::AcquisitionFailed(reason) => {
                warn!(reason = %reason, "Location acquisition failed");
                let status = self.platform.authorization_status();
                self.reconcile(status)?;
                true
            }
            SessionEvent::SamplesReceived(samples) => {
                let update = self.controller.on_samples_received(&samples);
                debug!(
                    samples = samples.len(),
                    device_moved = update.device_moved,
                    center_moved = update.center_moved,
                    "Samples applied"
                );
                update.is_changed()
            }
            SessionEvent::MapRegionChanged(center) => {
                self.controller.on_map_region_changed(center).is_changed()
            }
            SessionEvent::FollowToggled(enabled) => {
                self.controller.set_follow_enabled(enabled).is_changed()
            }
            SessionEvent::SendRequested { reply } => {
                let coordinate = self.controller.map_center();
                // Only a synchronous rejection changes the outcome here
                let changed = self.start_send(coordinate);
                if let Some(reply) = reply {
                    // The caller may have stopped waiting
                    let _ = reply.send(coordinate);
                }
                changed
            }
            SessionEvent::NetworkOutcomeDismissed => self.outcome.take().is_some(),
            SessionEvent::PermissionPromptDismissed => {
                let was_visible = self.permission.prompt_visible();
                self.permission.dismiss_prompt();
                was_visible
            }
        };

        Ok(changed)
    }

    fn reconcile(&mut self, status: AuthorizationStatus) -> Result<(), SessionError> {
        let decision = self.permission.reconcile(status, &self.platform)?;

        if let Some(issue) = &decision.issue {
            warn!(status = %status, error = %issue, "Location permission not usable yet");
        }
        if let Some(fix) = decision.immediate_fix {
            self.controller.apply_fix(fix);
        }

        Ok(())
    }

    /// Start a send. Returns true if it was rejected before any network
    /// activity, which sets the outcome immediately.
    fn start_send(&mut self, coordinate: Coordinate) -> bool {
        match self.reporter.prepare(coordinate) {
            Ok(request) => {
                let reporter = Arc::clone(&self.reporter);
                let completion_tx = self.completion_tx.clone();
                tokio::spawn(async move {
                    let result = reporter.deliver(request).await;
                    // The session may have stopped in the meantime
                    let _ = completion_tx.send(result);
                });
                false
            }
            Err(e) => {
                warn!(error = %e, coordinate = %coordinate, "Summon request rejected");
                self.outcome = Some(NetworkResult::failed(coordinate, e));
                true
            }
        }
    }

    fn on_send_completed(&mut self, result: NetworkResult) {
        debug!(
            success = result.success,
            coordinate = %result.coordinate,
            "Send completed"
        );
        self.outcome = Some(result);
    }

    fn publish(&self) {
        let snapshot = SessionSnapshot::capture(
            *self.controller.state(),
            self.permission.status(),
            self.permission.prompt_visible(),
            self.outcome.as_ref(),
        );

        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot;
                true
            }
        });
    }
}
