//! Admission cutoff server: entry point.
//!
//! Listens for TCP connections, reads one request per connection (applicant
//! marks plus a seat count) and answers with the cutoff mark as a single
//! big-endian `f32`.  Invalid requests are answered by closing the connection
//! without a reply.
//!
//! # Usage
//!
//! ```text
//! cutoff-server [OPTIONS]
//!
//! Options:
//!   --port            <PORT>  Listening port [default: 12345]
//!   --bind            <IP>    Bind address [default: 0.0.0.0]
//!   --session-timeout <SECS>  Per-session deadline [default: none]
//!   --max-applicants  <N>     Largest accepted applicant count [default: 100000]
//!   --config          <PATH>  TOML configuration file
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable                 | Flag                |
//! |--------------------------|---------------------|
//! | `CUTOFF_PORT`            | `--port`            |
//! | `CUTOFF_BIND`            | `--bind`            |
//! | `CUTOFF_SESSION_TIMEOUT` | `--session-timeout` |
//! | `CUTOFF_MAX_APPLICANTS`  | `--max-applicants`  |
//! | `CUTOFF_CONFIG`          | `--config`          |
//!
//! Settings resolve as: command line or environment, then the TOML file,
//! then the built-in defaults.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cutoff_server::domain::ServerConfig;
use cutoff_server::infrastructure::{run_server, ConfigFile};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Admission cutoff server.
///
/// Every option is optional so that an unset flag falls through to the
/// configuration file and then to the built-in default.
#[derive(Debug, Parser)]
#[command(
    name = "cutoff-server",
    about = "TCP service that computes the admission cutoff mark",
    version
)]
struct Cli {
    /// TCP port to listen on.
    #[arg(long, env = "CUTOFF_PORT")]
    port: Option<u16>,

    /// IP address to bind to.
    ///
    /// Use `127.0.0.1` to accept only local connections.
    #[arg(long, env = "CUTOFF_BIND")]
    bind: Option<String>,

    /// Deadline in seconds for a whole session.
    ///
    /// A peer that has not completed its request by then is disconnected.
    #[arg(long, env = "CUTOFF_SESSION_TIMEOUT")]
    session_timeout: Option<u64>,

    /// Largest applicant count a request may announce.
    #[arg(long, env = "CUTOFF_MAX_APPLICANTS")]
    max_applicants: Option<usize>,

    /// Path to a TOML configuration file.
    #[arg(long, env = "CUTOFF_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Resolves the final [`ServerConfig`] from defaults, the optional TOML
    /// file, and the command line, in that order.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded, `--bind` is not an
    /// IP address, or a numeric option is zero.
    fn into_server_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = ServerConfig::default();

        if let Some(path) = &self.config {
            let file = ConfigFile::load(path)
                .with_context(|| format!("failed to load config file {}", path.display()))?;
            config = file.apply_to(config)?;
        }

        if let Some(bind) = &self.bind {
            let ip: IpAddr = bind
                .parse()
                .with_context(|| format!("invalid bind address: '{bind}'"))?;
            config.bind_addr.set_ip(ip);
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(secs) = self.session_timeout {
            anyhow::ensure!(secs > 0, "--session-timeout must be at least 1 second");
            config.session_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(max) = self.max_applicants {
            anyhow::ensure!(max > 0, "--max-applicants must be at least 1");
            config.max_applicants = max;
        }

        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// 1. Initialise `tracing_subscriber` (level from `RUST_LOG`, default `info`).
/// 2. Parse the command line and resolve the [`ServerConfig`].
/// 3. Spawn a Ctrl+C handler that clears the shared `running` flag.
/// 4. Run the accept loop until the flag is cleared or accepting fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_server_config()?;

    info!(
        "admission cutoff server starting: bind={}, session_timeout={:?}, max_applicants={}",
        config.bind_addr, config.session_timeout, config.max_applicants
    );

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, stopping accept loop");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    run_server(config, running).await?;

    info!("admission cutoff server stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
