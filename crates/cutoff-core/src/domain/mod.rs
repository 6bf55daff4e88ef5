//! Admission rules for the cutoff service.
//!
//! This module contains pure business logic with no infrastructure
//! dependencies: nothing here reads a socket, spawns a task or logs.
//!
//! Code in outer layers (the wire codec, the server's session handler) depends
//! on the domain, but the domain never depends on them.  This makes every rule
//! testable on plain values.

/// Cutoff selection: the total at the seat boundary.
pub mod cutoff;

/// Ranked pass/fail report computed against a cutoff.
pub mod report;

/// Composite score model and the applicant record it validates.
pub mod score;
