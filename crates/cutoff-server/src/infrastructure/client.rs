//! Client side of the cutoff protocol.
//!
//! Opens a fresh connection per request, sends the request, reads exactly one
//! `f32` reply.  A server that rejects the request closes the connection
//! without replying, which surfaces here as an error.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use cutoff_core::protocol::messages::REPLY_SIZE;
use cutoff_core::{decode_reply, encode_request, rank_applicants, CutoffRequest, RankedApplicant};

/// Cutoff returned by the server together with the locally ranked report.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmissionOutcome {
    pub cutoff: f32,
    pub ranking: Vec<RankedApplicant>,
}

/// Sends `request` to the server at `addr` and returns the cutoff.
///
/// # Errors
///
/// Returns an error if the connection cannot be opened, the request cannot be
/// written, or the server closes the connection without a reply.
///
/// # Example
///
/// ```no_run
/// use cutoff_core::{ApplicantRecord, CutoffRequest};
/// use cutoff_server::infrastructure::client::request_cutoff;
///
/// # async fn example() -> anyhow::Result<()> {
/// let records = vec![ApplicantRecord::new(1, 90, 80, 70)?];
/// let request = CutoffRequest::new(records, 1)?;
/// let cutoff = request_cutoff("127.0.0.1:12345".parse()?, &request).await?;
/// # Ok(())
/// # }
/// ```
pub async fn request_cutoff(addr: SocketAddr, request: &CutoffRequest) -> anyhow::Result<f32> {
    let mut stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("failed to connect to cutoff server at {addr}"))?;

    stream
        .write_all(&encode_request(request))
        .await
        .context("failed to send cutoff request")?;
    stream.flush().await.context("failed to flush cutoff request")?;

    let mut reply = [0u8; REPLY_SIZE];
    stream
        .read_exact(&mut reply)
        .await
        .context("server closed the connection without a cutoff reply")?;

    Ok(decode_reply(&reply)?)
}

/// Requests the cutoff and ranks the applicants against it.
///
/// # Errors
///
/// See [`request_cutoff`].
pub async fn request_admission(
    addr: SocketAddr,
    request: &CutoffRequest,
) -> anyhow::Result<AdmissionOutcome> {
    let cutoff = request_cutoff(addr, request).await?;
    Ok(AdmissionOutcome {
        cutoff,
        ranking: rank_applicants(request.records(), cutoff),
    })
}
