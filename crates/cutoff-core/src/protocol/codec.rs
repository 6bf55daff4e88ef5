//! Binary codec for the cutoff protocol.
//!
//! Wire format (all fields big-endian):
//! ```text
//! request: [count:i32] ([maths:i32][physics:i32][chemistry:i32]) × count [seats:i32]
//! reply:   [cutoff:f32]
//! ```
//!
//! Decoding is driven by [`RequestDecoder`], a sans-IO state machine fed one
//! `i32` field at a time.  Each field is validated the moment it arrives, so a
//! reader driving the decoder from a socket stops reading as soon as the
//! request is known to be bad.  [`decode_request`] drives the same machine
//! over an in-memory slice.

use thiserror::Error;

use crate::domain::score::{ApplicantRecord, ScoreError};
use crate::protocol::messages::{
    CutoffRequest, DEFAULT_MAX_APPLICANTS, FIELD_SIZE, MARKS_PER_APPLICANT, REPLY_SIZE,
};

/// Records reserved up front, whatever count the peer announces.
const PREALLOCATE_LIMIT: usize = 1024;

/// Errors that can occur during request or reply decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    /// The applicant count is not positive or exceeds the configured bound.
    #[error("invalid applicant count {count}: must be in 1..={max}")]
    InvalidCount { count: i64, max: usize },

    /// An applicant record failed scoring.
    #[error(transparent)]
    Score(#[from] ScoreError),

    /// The seat count is not in `1..=applicant_count`.
    #[error("seat count {seats} is invalid for {applicants} applicants")]
    InvalidSeatCount { seats: i64, applicants: usize },

    /// The input ended before the request was complete.
    #[error("truncated input: need at least {needed} bytes, got {available}")]
    TruncatedInput { needed: usize, available: usize },
}

// ── Streaming request decoder ─────────────────────────────────────────────────

/// Result of feeding one field to a [`RequestDecoder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// More fields are required.
    NeedMore,
    /// The final field arrived and the request validated.
    Complete(CutoffRequest),
}

#[derive(Debug, Clone, PartialEq)]
enum Stage {
    Count,
    Marks {
        expected: usize,
        pending: [i32; MARKS_PER_APPLICANT],
        filled: usize,
    },
    Seats,
    Finished,
}

/// Incremental request decoder.
///
/// Fields must be pushed in wire order.  Once the decoder has returned
/// [`Decoded::Complete`] or an error it is finished, and further fields are
/// ignored.
///
/// # Examples
///
/// ```rust
/// use cutoff_core::protocol::codec::{Decoded, RequestDecoder};
///
/// let mut decoder = RequestDecoder::new();
/// for field in [1, 90, 80, 70] {
///     assert_eq!(decoder.push_field(field).unwrap(), Decoded::NeedMore);
/// }
/// let Decoded::Complete(request) = decoder.push_field(1).unwrap() else {
///     panic!("request should be complete");
/// };
/// assert_eq!(request.totals(), vec![165.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RequestDecoder {
    max_applicants: usize,
    stage: Stage,
    records: Vec<ApplicantRecord>,
    fields_consumed: usize,
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestDecoder {
    /// Creates a decoder bounded by [`DEFAULT_MAX_APPLICANTS`].
    pub fn new() -> Self {
        Self::with_max_applicants(DEFAULT_MAX_APPLICANTS)
    }

    /// Creates a decoder that rejects applicant counts above `max_applicants`.
    pub fn with_max_applicants(max_applicants: usize) -> Self {
        Self {
            max_applicants,
            stage: Stage::Count,
            records: Vec::new(),
            fields_consumed: 0,
        }
    }

    /// Feeds the next big-endian field, already converted to `i32`.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::InvalidCount`] on the first field if it is not in
    ///   `1..=max_applicants`.
    /// - [`ProtocolError::Score`] when a completed triple fails scoring.
    /// - [`ProtocolError::InvalidSeatCount`] on the last field.
    pub fn push_field(&mut self, value: i32) -> Result<Decoded, ProtocolError> {
        if self.stage == Stage::Finished {
            return Ok(Decoded::NeedMore);
        }
        self.fields_consumed += 1;

        let result = self.advance(value);
        if result.is_err() {
            self.stage = Stage::Finished;
        }
        result
    }

    fn advance(&mut self, value: i32) -> Result<Decoded, ProtocolError> {
        match &mut self.stage {
            Stage::Count => {
                if value <= 0 || value as usize > self.max_applicants {
                    return Err(ProtocolError::InvalidCount {
                        count: i64::from(value),
                        max: self.max_applicants,
                    });
                }
                let expected = value as usize;
                self.records = Vec::with_capacity(expected.min(PREALLOCATE_LIMIT));
                self.stage = Stage::Marks {
                    expected,
                    pending: [0; MARKS_PER_APPLICANT],
                    filled: 0,
                };
                Ok(Decoded::NeedMore)
            }
            Stage::Marks {
                expected,
                pending,
                filled,
            } => {
                pending[*filled] = value;
                *filled += 1;
                if *filled < MARKS_PER_APPLICANT {
                    return Ok(Decoded::NeedMore);
                }

                let [maths, physics, chemistry] = *pending;
                let expected = *expected;
                let record =
                    ApplicantRecord::new(self.records.len() + 1, maths, physics, chemistry)?;
                self.records.push(record);

                self.stage = if self.records.len() == expected {
                    Stage::Seats
                } else {
                    Stage::Marks {
                        expected,
                        pending: [0; MARKS_PER_APPLICANT],
                        filled: 0,
                    }
                };
                Ok(Decoded::NeedMore)
            }
            Stage::Seats => {
                let applicants = self.records.len();
                if value <= 0 || value as usize > applicants {
                    return Err(ProtocolError::InvalidSeatCount {
                        seats: i64::from(value),
                        applicants,
                    });
                }
                self.stage = Stage::Finished;
                let records = std::mem::take(&mut self.records);
                Ok(Decoded::Complete(CutoffRequest::new(records, value as usize)?))
            }
            Stage::Finished => Ok(Decoded::NeedMore),
        }
    }

    /// Applicant count announced by the peer, once the first field is in.
    pub fn applicant_count(&self) -> Option<usize> {
        match &self.stage {
            Stage::Marks { expected, .. } => Some(*expected),
            Stage::Seats => Some(self.records.len()),
            Stage::Count | Stage::Finished => None,
        }
    }

    /// Minimum number of fields still required to complete the request.
    pub fn fields_remaining(&self) -> usize {
        match &self.stage {
            Stage::Count => 1,
            Stage::Marks {
                expected, filled, ..
            } => (expected - self.records.len()) * MARKS_PER_APPLICANT - filled + 1,
            Stage::Seats => 1,
            Stage::Finished => 0,
        }
    }

    /// Bytes consumed so far.
    pub fn bytes_consumed(&self) -> usize {
        self.fields_consumed * FIELD_SIZE
    }

    /// Minimum total request size in bytes, given what has been decoded.
    pub fn bytes_needed(&self) -> usize {
        self.bytes_consumed() + self.fields_remaining() * FIELD_SIZE
    }

    /// `true` once the decoder has completed or failed.
    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Finished
    }

    /// Drives the decoder over an in-memory buffer.
    ///
    /// Returns the request and the number of bytes consumed; trailing bytes
    /// after the seat count are left untouched.
    ///
    /// # Errors
    ///
    /// Any validation error from [`push_field`](Self::push_field), or
    /// [`ProtocolError::TruncatedInput`] if `bytes` ends first.
    pub fn decode_slice(mut self, bytes: &[u8]) -> Result<(CutoffRequest, usize), ProtocolError> {
        for chunk in bytes.chunks_exact(FIELD_SIZE) {
            let value = i32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            if let Decoded::Complete(request) = self.push_field(value)? {
                return Ok((request, self.bytes_consumed()));
            }
        }
        Err(ProtocolError::TruncatedInput {
            needed: self.bytes_needed(),
            available: bytes.len(),
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Decodes one request from the beginning of `bytes`.
///
/// # Errors
///
/// See [`RequestDecoder::decode_slice`].
///
/// # Examples
///
/// ```rust
/// use cutoff_core::{decode_request, encode_request, ApplicantRecord, CutoffRequest};
///
/// let records = vec![ApplicantRecord::new(1, 90, 80, 70).unwrap()];
/// let request = CutoffRequest::new(records, 1).unwrap();
/// let bytes = encode_request(&request);
/// let (decoded, consumed) = decode_request(&bytes).unwrap();
/// assert_eq!(decoded, request);
/// assert_eq!(consumed, bytes.len());
/// ```
pub fn decode_request(bytes: &[u8]) -> Result<(CutoffRequest, usize), ProtocolError> {
    RequestDecoder::new().decode_slice(bytes)
}

/// Encodes a request into its wire form.
pub fn encode_request(request: &CutoffRequest) -> Vec<u8> {
    let mut buf = Vec::with_capacity(request.wire_len());
    buf.extend_from_slice(&(request.applicant_count() as i32).to_be_bytes());
    for record in request.records() {
        for mark in record.marks() {
            buf.extend_from_slice(&mark.to_be_bytes());
        }
    }
    buf.extend_from_slice(&(request.seat_count() as i32).to_be_bytes());
    buf
}

/// Encodes the cutoff reply.
pub fn encode_reply(cutoff: f32) -> [u8; REPLY_SIZE] {
    cutoff.to_be_bytes()
}

/// Decodes the cutoff reply from the beginning of `bytes`.
///
/// # Errors
///
/// Returns [`ProtocolError::TruncatedInput`] if fewer than four bytes are available.
pub fn decode_reply(bytes: &[u8]) -> Result<f32, ProtocolError> {
    match bytes {
        [a, b, c, d, ..] => Ok(f32::from_be_bytes([*a, *b, *c, *d])),
        _ => Err(ProtocolError::TruncatedInput {
            needed: REPLY_SIZE,
            available: bytes.len(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
