//! Stream-level request reader and reply writer.
//!
//! The request is read one 4-byte field at a time straight from the stream
//! and pushed into a [`RequestDecoder`].  Nothing is read ahead: when a field
//! fails validation, the bytes after it are never pulled off the socket.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use cutoff_core::protocol::codec::Decoded;
use cutoff_core::protocol::messages::FIELD_SIZE;
use cutoff_core::{encode_reply, CutoffRequest, ProtocolError, RequestDecoder};

use crate::application::SessionError;

/// Reads and validates one request from `reader`.
///
/// # Errors
///
/// - [`SessionError::Protocol`] for any validation failure, including
///   [`ProtocolError::TruncatedInput`] when the peer closes early.
/// - [`SessionError::Transport`] for any other I/O error.
pub async fn read_request<R>(reader: &mut R, max_applicants: usize) -> Result<CutoffRequest, SessionError>
where
    R: AsyncRead + Unpin,
{
    let mut decoder = RequestDecoder::with_max_applicants(max_applicants);
    let mut field = [0u8; FIELD_SIZE];

    loop {
        let filled = read_field(reader, &mut field).await?;
        if filled < FIELD_SIZE {
            return Err(ProtocolError::TruncatedInput {
                needed: decoder.bytes_needed(),
                available: decoder.bytes_consumed() + filled,
            }
            .into());
        }

        if let Decoded::Complete(request) = decoder.push_field(i32::from_be_bytes(field))? {
            return Ok(request);
        }
    }
}

/// Fills `buf` from `reader`, returning fewer than `FIELD_SIZE` bytes only at EOF.
async fn read_field<R>(reader: &mut R, buf: &mut [u8; FIELD_SIZE]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < FIELD_SIZE {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Writes the cutoff reply and flushes it.
///
/// # Errors
///
/// Returns any I/O error from the write or the flush.
pub async fn write_reply<W>(writer: &mut W, cutoff: f32) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&encode_reply(cutoff)).await?;
    writer.flush().await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
