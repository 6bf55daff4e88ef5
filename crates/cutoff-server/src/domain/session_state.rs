//! Session lifecycle states.
//!
//! ```text
//! Idle ─▶ Decoding ─▶ Computing ─▶ Encoding ─▶ Closed
//!             │            │           │
//!             └────────────┴───────────┴──────▶ ErrorClosed
//! ```
//!
//! `ErrorClosed` is reachable from every non-terminal state because a
//! transport failure can happen at any point.

use std::fmt;

/// Where a session is in its single request/reply exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connection accepted, nothing read yet.
    Idle,
    /// Reading and validating the request.
    Decoding,
    /// Selecting the cutoff.
    Computing,
    /// Writing the reply.
    Encoding,
    /// Reply sent and connection closed.
    Closed,
    /// Connection closed without a reply.
    ErrorClosed,
}

impl SessionState {
    /// `true` for [`Closed`](Self::Closed) and [`ErrorClosed`](Self::ErrorClosed).
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Closed | SessionState::ErrorClosed)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: SessionState) -> bool {
        use SessionState::{Closed, Computing, Decoding, Encoding, ErrorClosed, Idle};

        match (self, next) {
            (Idle, Decoding)
            | (Decoding, Computing)
            | (Computing, Encoding)
            | (Encoding, Closed) => true,
            (from, ErrorClosed) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "idle",
            SessionState::Decoding => "decoding",
            SessionState::Computing => "computing",
            SessionState::Encoding => "encoding",
            SessionState::Closed => "closed",
            SessionState::ErrorClosed => "error-closed",
        };
        f.write_str(name)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
