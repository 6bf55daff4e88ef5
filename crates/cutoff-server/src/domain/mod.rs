//! Domain layer for cutoff-server.
//!
//! Pure types with no dependencies on I/O, networking, or the async runtime.
//!
//! # What belongs in the domain layer?
//!
//! - Configuration structures
//! - The session state machine's states and legal transitions
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `TcpStream`, or file types
//! - Environment variable or configuration file reading

pub mod config;
pub mod session_state;

pub use config::ServerConfig;
pub use session_state::SessionState;
