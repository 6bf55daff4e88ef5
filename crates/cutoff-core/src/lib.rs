//! # cutoff-core
//!
//! Shared library for the admission cutoff service containing the score
//! model, the cutoff selection rule and the binary wire codec.
//!
//! This crate is used by both the server and the client helper.  It has zero
//! dependencies on async runtimes, sockets, or logging backends.
//!
//! # Architecture overview
//!
//! The service answers a single question: given the subject marks of N
//! applicants and S seats, what composite total must an applicant reach to be
//! admitted?  The answer is the S-th highest composite total.
//!
//! - **`domain`** – Pure admission rules.  [`score`] turns three marks into a
//!   composite total, [`cutoff_mark`] selects the total at the seat boundary,
//!   and [`rank_applicants`] labels each applicant against a cutoff.
//!
//! - **`protocol`** – How bytes travel over the network.  A request is a flat
//!   run of big-endian 32-bit integers and the reply is one big-endian
//!   `f32`.  The [`RequestDecoder`] consumes the request one field at a time
//!   so the server can stop reading the moment a field fails validation.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `cutoff_core::cutoff_mark` instead of `cutoff_core::domain::cutoff::cutoff_mark`.
pub use domain::cutoff::{cutoff_mark, CutoffError};
pub use domain::report::{rank_applicants, AdmissionStatus, RankedApplicant};
pub use domain::score::{score, ApplicantRecord, ScoreError, Subject};
pub use protocol::codec::{
    decode_reply, decode_request, encode_reply, encode_request, Decoded, ProtocolError,
    RequestDecoder,
};
pub use protocol::messages::CutoffRequest;
