//! Infrastructure layer for cutoff-server.
//!
//! The infrastructure layer handles all I/O: accepting TCP connections,
//! reading requests and writing replies, and loading the configuration file.
//!
//! # Responsibilities
//!
//! - Binding the listener and running the accept loop
//! - Spawning one Tokio task per connection
//! - Reading the request field by field and writing the reply
//! - Applying the optional session deadline
//! - Reading the TOML configuration file
//!
//! # What does NOT belong here?
//!
//! - Validation and cutoff rules (those live in `cutoff-core`)
//! - Session state bookkeeping (that is the application layer)
//! - Command-line parsing (that is done in `main.rs`)

pub mod client;
pub mod config_file;
pub mod connection;
pub mod server;
pub mod wire;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use config_file::ConfigFile;
pub use server::{run_server, CutoffServer};
