//! Lifecycle of a single request/reply session.
//!
//! A [`Session`] tracks which [`SessionState`] the exchange is in, runs the
//! compute step, and turns the final outcome into a [`SessionReport`].  It
//! never touches the socket; the infrastructure layer reads the request and
//! writes the reply, calling [`Session::advance`] around each step.
//!
//! Every failure is terminal.  It is logged once, here, and the peer sees
//! nothing but the connection closing.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use cutoff_core::{cutoff_mark, CutoffError, CutoffRequest, ProtocolError};

use crate::domain::SessionState;

// ── Error type ────────────────────────────────────────────────────────────────

/// Everything that can end a session without a reply.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The request failed validation or was cut short.
    #[error("invalid request: {0}")]
    Protocol(#[from] ProtocolError),

    /// The cutoff step rejected the decoded request.
    #[error("cutoff computation failed: {0}")]
    Cutoff(#[from] CutoffError),

    /// Reading, writing or closing the connection failed.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The session deadline elapsed.
    #[error("session timed out after {0:?}")]
    TimedOut(Duration),
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Final outcome of a session, returned to the connection task.
#[derive(Debug)]
pub struct SessionReport {
    pub id: Uuid,
    pub peer: String,
    /// Always [`SessionState::Closed`] or [`SessionState::ErrorClosed`].
    pub state: SessionState,
    /// State the session was in when it failed.
    pub failed_in: Option<SessionState>,
    /// The cutoff that was sent, on success.
    pub cutoff: Option<f32>,
    pub error: Option<SessionError>,
}

impl SessionReport {
    /// `true` if the reply was written.
    pub fn is_success(&self) -> bool {
        self.state == SessionState::Closed
    }
}

/// State tracker for one accepted connection.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    peer: String,
    state: SessionState,
}

impl Session {
    /// Starts a session in [`SessionState::Idle`].
    pub fn new(peer: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            peer: peer.into(),
            state: SessionState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn peer(&self) -> &str {
        &self.peer
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Moves to `next`.
    ///
    /// Illegal transitions are a programming error and trip a debug assertion.
    pub fn advance(&mut self, next: SessionState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal session transition {} -> {}",
            self.state,
            next
        );
        debug!("session {} ({}): {} -> {}", self.id, self.peer, self.state, next);
        self.state = next;
    }

    /// Runs the compute step on a fully validated request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Cutoff`] if the seat count is out of range.
    /// A decoded [`CutoffRequest`] never is, but the calculator re-checks.
    pub fn compute(&mut self, request: &CutoffRequest) -> Result<f32, SessionError> {
        self.advance(SessionState::Computing);
        debug!(
            "session {}: {} applicants, {} seats",
            self.id,
            request.applicant_count(),
            request.seat_count()
        );
        let cutoff = cutoff_mark(&request.totals(), request.seat_count())?;
        Ok(cutoff)
    }

    /// Closes the session and logs the outcome.
    pub fn finish(mut self, outcome: Result<f32, SessionError>) -> SessionReport {
        match outcome {
            Ok(cutoff) => {
                self.advance(SessionState::Closed);
                info!("session {} ({}): cutoff {cutoff} sent", self.id, self.peer);
                SessionReport {
                    id: self.id,
                    peer: self.peer,
                    state: SessionState::Closed,
                    failed_in: None,
                    cutoff: Some(cutoff),
                    error: None,
                }
            }
            Err(e) => {
                let failed_in = self.state;
                self.advance(SessionState::ErrorClosed);
                warn!(
                    "session {} ({}): closed without reply while {failed_in}: {e}",
                    self.id, self.peer
                );
                SessionReport {
                    id: self.id,
                    peer: self.peer,
                    state: SessionState::ErrorClosed,
                    failed_in: Some(failed_in),
                    cutoff: None,
                    error: Some(e),
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
