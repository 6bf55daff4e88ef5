//! Drives one session over a byte stream.
//!
//! [`handle_connection`] owns the stream for the whole exchange, so the
//! connection is closed when it returns, on every path.  It is generic over
//! the stream type so tests can drive it with in-memory mocks.

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::application::{Session, SessionError, SessionReport};
use crate::domain::{ServerConfig, SessionState};
use crate::infrastructure::wire::{read_request, write_reply};

/// Runs decode → compute → encode → close for one accepted connection.
///
/// Failures are logged by [`Session::finish`] and reflected in the returned
/// report; no reply is written after a failure.
pub async fn handle_connection<S>(mut stream: S, peer: String, config: &ServerConfig) -> SessionReport
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut session = Session::new(peer);

    let outcome = match config.session_timeout {
        Some(limit) => timeout(limit, exchange(&mut session, &mut stream, config.max_applicants))
            .await
            .unwrap_or_else(|_| Err(SessionError::TimedOut(limit))),
        None => exchange(&mut session, &mut stream, config.max_applicants).await,
    };

    session.finish(outcome)
}

async fn exchange<S>(
    session: &mut Session,
    stream: &mut S,
    max_applicants: usize,
) -> Result<f32, SessionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    session.advance(SessionState::Decoding);
    let request = read_request(stream, max_applicants).await?;

    let cutoff = session.compute(&request)?;

    session.advance(SessionState::Encoding);
    write_reply(stream, cutoff).await?;
    stream.shutdown().await?;

    Ok(cutoff)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
