//! Server configuration types.
//!
//! [`ServerConfig`] is the single source of truth for all runtime settings.
//! It starts from [`Default`] and is then overlaid with the optional TOML file
//! and finally the command line (see `main.rs`).

use std::net::SocketAddr;
use std::time::Duration;

use cutoff_core::protocol::messages::DEFAULT_MAX_APPLICANTS;

/// Default TCP port of the cutoff service.
pub const DEFAULT_PORT: u16 = 12345;

/// All runtime configuration for the cutoff server.
///
/// Built once at startup and shared read-only across session tasks through
/// an `Arc`.
///
/// # Example
///
/// ```rust
/// use cutoff_server::domain::ServerConfig;
///
/// let cfg = ServerConfig::default();
/// assert_eq!(cfg.bind_addr.port(), 12345);
/// assert!(cfg.session_timeout.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address and port the listener binds to.
    pub bind_addr: SocketAddr,

    /// Deadline for a whole session (read request, compute, write reply).
    ///
    /// `None` means a stalled peer may hold its session open indefinitely.
    pub session_timeout: Option<Duration>,

    /// Largest applicant count a request may announce.
    pub max_applicants: usize,
}

impl Default for ServerConfig {
    /// | Field           | Default         |
    /// |-----------------|-----------------|
    /// | bind_addr       | `0.0.0.0:12345` |
    /// | session_timeout | none            |
    /// | max_applicants  | 100 000         |
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            session_timeout: None,
            max_applicants: DEFAULT_MAX_APPLICANTS,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
