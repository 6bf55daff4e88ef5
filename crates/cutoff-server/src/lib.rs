//! cutoff-server library crate.
//!
//! This crate provides the network-facing admission cutoff service: it accepts
//! TCP connections, reads one binary request per connection, and answers with
//! the cutoff mark as a single big-endian `f32`.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Client (binary request over TCP)
//!         ↕
//! [cutoff-server]
//!   ├── domain/           Pure types: ServerConfig, SessionState
//!   ├── application/      Session lifecycle: state machine, cutoff step, error taxonomy
//!   └── infrastructure/
//!         ├── server/      Accept loop, one Tokio task per connection
//!         ├── connection/  Drives one session over a byte stream
//!         ├── wire/        Field-by-field request reader, reply writer
//!         ├── client/      Request helper used by callers and tests
//!         └── config_file/ TOML configuration file
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async code.
//! - `application` depends on `domain` and `cutoff-core` only.
//! - `infrastructure` depends on all other layers plus `tokio`.

/// Domain layer: configuration and session state types (no I/O).
pub mod domain;

/// Application layer: session lifecycle and error taxonomy.
pub mod application;

/// Infrastructure layer: sockets, wire I/O, configuration file.
pub mod infrastructure;
