//! Ranked admission report.
//!
//! The server only ever answers with a cutoff.  Whoever asked for it ranks
//! the applicants and decides pass/fail locally; this module is that rule,
//! kept next to [`crate::cutoff_mark`] so both sides agree on the numbers.

use std::fmt;

use crate::domain::score::ApplicantRecord;

/// Outcome of comparing an applicant's total against the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionStatus {
    Passed,
    NotPassed,
}

impl AdmissionStatus {
    /// `Passed` when `total >= cutoff`.
    pub fn for_total(total: f32, cutoff: f32) -> Self {
        if total >= cutoff {
            AdmissionStatus::Passed
        } else {
            AdmissionStatus::NotPassed
        }
    }
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmissionStatus::Passed => f.write_str("Passed"),
            AdmissionStatus::NotPassed => f.write_str("Not Passed"),
        }
    }
}

/// One row of the ranked report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedApplicant {
    /// 1-based position in descending total order.
    pub rank: usize,
    pub record: ApplicantRecord,
    pub status: AdmissionStatus,
}

/// Ranks `records` by descending total and labels each against `cutoff`.
///
/// The sort is stable, so applicants with equal totals keep their submission
/// order.
pub fn rank_applicants(records: &[ApplicantRecord], cutoff: f32) -> Vec<RankedApplicant> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| b.total().total_cmp(&a.total()));

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, record)| RankedApplicant {
            rank: index + 1,
            record,
            status: AdmissionStatus::for_total(record.total(), cutoff),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
