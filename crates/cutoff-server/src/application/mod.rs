//! Application layer for cutoff-server.
//!
//! The application layer knows *what* a session does (decode, compute,
//! encode, close) but delegates *how* bytes move to the infrastructure layer.
//!
//! # Responsibilities
//!
//! - Tracking the session state machine
//! - Running the cutoff computation on a validated request
//! - Defining the `SessionError` taxonomy and logging each failure once

pub mod session;

pub use session::{Session, SessionError, SessionReport};
