//! Connection acceptor: accept loop and per-session task management.
//!
//! This module is responsible for:
//!
//! 1. Binding a TCP listener on the configured address.
//! 2. Accepting incoming connections in a single sequential loop.
//! 3. Handing each connection to its own Tokio task running
//!    [`handle_connection`].
//! 4. Stopping when the `running` flag is cleared.
//!
//! # Isolation
//!
//! The accept loop never waits on a session: it spawns the task and goes
//! straight back to `accept()`.  Sessions share nothing but the read-only
//! [`ServerConfig`], so a stalled or malformed peer cannot affect any other
//! session or the acceptor itself.
//!
//! A bind failure or an accept failure is fatal and is returned to the caller.

use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::{error, info};

use crate::domain::ServerConfig;
use crate::infrastructure::connection::handle_connection;

/// How often the accept loop wakes up to check the shutdown flag.
const SHUTDOWN_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// A bound, not yet running, cutoff server.
///
/// Binding and running are separate steps so callers (and tests binding port
/// 0) can learn the actual listening address first.
pub struct CutoffServer {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl CutoffServer {
    /// Binds the listener on `config.bind_addr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is in use or cannot be bound.
    pub async fn bind(config: ServerConfig) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(config.bind_addr)
            .await
            .with_context(|| format!("failed to bind cutoff listener on {}", config.bind_addr))?;

        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    /// The address the listener is actually bound to.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS cannot report the socket address.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop until `running` is set to `false`.
    ///
    /// Sessions already in flight when the loop stops run to completion in
    /// their own tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if `accept()` fails.
    pub async fn run(self, running: Arc<AtomicBool>) -> anyhow::Result<()> {
        let local_addr = self.local_addr().context("failed to read listener address")?;
        info!("cutoff server listening on {local_addr}");

        loop {
            if !running.load(Ordering::Relaxed) {
                info!("shutdown flag set; stopping accept loop");
                break;
            }

            // Bounded wait so the shutdown flag is re-checked even when idle.
            let (stream, peer_addr) = match timeout(SHUTDOWN_POLL_INTERVAL, self.listener.accept()).await {
                Ok(Ok(accepted)) => accepted,
                Ok(Err(e)) => {
                    error!("accept failed on {local_addr}: {e}");
                    return Err(e).with_context(|| format!("accept failed on {local_addr}"));
                }
                Err(_) => continue,
            };

            info!("client connected: {peer_addr}");
            let config = Arc::clone(&self.config);
            tokio::spawn(async move {
                // Outcome is already logged by the session.
                let _report = handle_connection(stream, peer_addr.to_string(), &config).await;
            });
        }

        Ok(())
    }
}

/// Binds `config.bind_addr` and runs the accept loop until `running` is cleared.
///
/// # Errors
///
/// Returns an error if binding or accepting fails.
pub async fn run_server(config: ServerConfig, running: Arc<AtomicBool>) -> anyhow::Result<()> {
    CutoffServer::bind(config).await?.run(running).await
}
