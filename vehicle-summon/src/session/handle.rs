//! Cloneable handle for feeding a running session.

use tokio::sync::{mpsc, oneshot, watch};

use super::error::SessionError;
use super::event::SessionEvent;
use super::snapshot::SessionSnapshot;
use crate::coord::Coordinate;
use crate::location::{AuthorizationStatus, LocationSample};

/// Sender side of a [`super::SummonSession`].
///
/// Every method fails with [`SessionError::Closed`] once the session loop has
/// stopped. Dropping every handle stops the loop.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    events: mpsc::Sender<SessionEvent>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    pub(crate) fn new(
        events: mpsc::Sender<SessionEvent>,
        snapshots: watch::Receiver<SessionSnapshot>,
    ) -> Self {
        Self { events, snapshots }
    }

    /// Enqueue a raw event.
    pub async fn send(&self, event: SessionEvent) -> Result<(), SessionError> {
        self.events
            .send(event)
            .await
            .map_err(|_| SessionError::Closed)
    }

    pub async fn authorization_changed(
        &self,
        status: AuthorizationStatus,
    ) -> Result<(), SessionError> {
        self.send(SessionEvent::AuthorizationChanged(status)).await
    }

    pub async fn acquisition_failed(&self, reason: impl Into<String>) -> Result<(), SessionError> {
        self.send(SessionEvent::AcquisitionFailed(reason.into()))
            .await
    }

    pub async fn samples_received(
        &self,
        samples: Vec<LocationSample>,
    ) -> Result<(), SessionError> {
        self.send(SessionEvent::SamplesReceived(samples)).await
    }

    pub async fn map_region_changed(&self, center: Coordinate) -> Result<(), SessionError> {
        self.send(SessionEvent::MapRegionChanged(center)).await
    }

    pub async fn set_follow(&self, enabled: bool) -> Result<(), SessionError> {
        self.send(SessionEvent::FollowToggled(enabled)).await
    }

    /// Summon the vehicle to the current map center.
    ///
    /// The request is queued behind every event sent before it, so a pan
    /// followed by a summon sends the panned center. Returns the coordinate
    /// that was sent.
    pub async fn summon(&self) -> Result<Coordinate, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SessionEvent::SendRequested {
            reply: Some(reply_tx),
        })
        .await?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn dismiss_network_outcome(&self) -> Result<(), SessionError> {
        self.send(SessionEvent::NetworkOutcomeDismissed).await
    }

    pub async fn dismiss_permission_prompt(&self) -> Result<(), SessionError> {
        self.send(SessionEvent::PermissionPromptDismissed).await
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Returns true once the session loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.events.is_closed()
    }
}
