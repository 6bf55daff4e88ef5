//! Request type and wire constants for the cutoff protocol.
//!
//! A request is a flat sequence of big-endian `i32` fields with no header or
//! length prefix beyond the applicant count itself:
//!
//! ```text
//! [applicant_count][maths physics chemistry] × applicant_count [seat_count]
//! ```
//!
//! The reply is a single big-endian IEEE-754 `f32`.

use crate::domain::score::ApplicantRecord;
use crate::protocol::codec::ProtocolError;

// ── Protocol constants ────────────────────────────────────────────────────────

/// Size of every request field on the wire (one `i32`).
pub const FIELD_SIZE: usize = 4;

/// Number of mark fields per applicant.
pub const MARKS_PER_APPLICANT: usize = 3;

/// Size of the reply on the wire (one `f32`).
pub const REPLY_SIZE: usize = 4;

/// Default upper bound on the applicant count a decoder will accept.
pub const DEFAULT_MAX_APPLICANTS: usize = 100_000;

/// Size in bytes of a request carrying `applicants` records.
pub const fn request_len(applicants: usize) -> usize {
    FIELD_SIZE * (2 + MARKS_PER_APPLICANT * applicants)
}

// ── Request ───────────────────────────────────────────────────────────────────

/// A fully validated cutoff request.
///
/// Holding a `CutoffRequest` means the applicant count was positive, every
/// record scored cleanly and `0 < seat_count <= records.len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct CutoffRequest {
    records: Vec<ApplicantRecord>,
    seat_count: usize,
}

impl CutoffRequest {
    /// Builds a request from already-scored records.
    ///
    /// # Errors
    ///
    /// - [`ProtocolError::InvalidCount`] if `records` is empty or does not fit
    ///   in the `i32` count field.
    /// - [`ProtocolError::InvalidSeatCount`] unless `0 < seat_count <= records.len()`.
    pub fn new(records: Vec<ApplicantRecord>, seat_count: usize) -> Result<Self, ProtocolError> {
        if records.is_empty() || records.len() > i32::MAX as usize {
            return Err(ProtocolError::InvalidCount {
                count: records.len() as i64,
                max: i32::MAX as usize,
            });
        }
        if seat_count == 0 || seat_count > records.len() {
            return Err(ProtocolError::InvalidSeatCount {
                seats: seat_count as i64,
                applicants: records.len(),
            });
        }
        Ok(Self {
            records,
            seat_count,
        })
    }

    /// Number of applicants in the request.
    pub fn applicant_count(&self) -> usize {
        self.records.len()
    }

    /// Records in submission order.
    pub fn records(&self) -> &[ApplicantRecord] {
        &self.records
    }

    /// Number of seats to fill.
    pub fn seat_count(&self) -> usize {
        self.seat_count
    }

    /// Composite totals in submission order.
    pub fn totals(&self) -> Vec<f32> {
        self.records.iter().map(ApplicantRecord::total).collect()
    }

    /// Size of this request on the wire.
    pub fn wire_len(&self) -> usize {
        request_len(self.records.len())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
