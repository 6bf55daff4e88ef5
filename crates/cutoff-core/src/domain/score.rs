//! Composite score model.
//!
//! Every applicant submits three integer marks out of 100.  The composite
//! total counts Mathematics at full weight and Physics and Chemistry at half
//! weight:
//!
//! ```text
//! total = maths + physics / 2 + chemistry / 2        (0.0 ..= 200.0)
//! ```
//!
//! The total is a pure function of the marks.  [`ApplicantRecord`] computes it
//! once at construction and never exposes a way to change it afterwards.

use std::fmt;

use thiserror::Error;

/// Lowest mark accepted for any subject.
pub const MIN_MARK: i32 = 0;

/// Highest mark accepted for any subject.
pub const MAX_MARK: i32 = 100;

/// Highest composite total a valid applicant can reach (100 + 50 + 50).
pub const MAX_TOTAL: f32 = 200.0;

/// The three subjects that make up a composite total, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Mathematics,
    Physics,
    Chemistry,
}

impl Subject {
    /// All subjects in the order they appear in a request triple.
    pub const ALL: [Subject; 3] = [Subject::Mathematics, Subject::Physics, Subject::Chemistry];

    /// Human-readable subject name used in error messages and reports.
    pub fn name(self) -> &'static str {
        match self {
            Subject::Mathematics => "mathematics",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors raised while scoring a single applicant.
///
/// Both variants carry the 1-based ordinal of the applicant so the operator
/// log can point at the offending record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// One of the three marks lies outside `0..=100`.
    #[error("applicant {ordinal}: {subject} mark {mark} is outside 0..=100")]
    OutOfRangeMark {
        ordinal: usize,
        subject: Subject,
        mark: i32,
    },

    /// The composite total came out above 200.
    ///
    /// Unreachable for marks that passed the range check, but kept so the
    /// validation order matches the reference service exactly.
    #[error("applicant {ordinal}: composite total {total} exceeds 200")]
    TotalExceedsMaximum { ordinal: usize, total: f32 },
}

/// Computes the composite total for the applicant at `ordinal`.
///
/// Marks are checked in wire order (mathematics, physics, chemistry) and the
/// first one out of range is reported.
///
/// # Errors
///
/// - [`ScoreError::OutOfRangeMark`] if any mark is outside `0..=100`.
/// - [`ScoreError::TotalExceedsMaximum`] if the total exceeds [`MAX_TOTAL`].
///
/// # Examples
///
/// ```rust
/// use cutoff_core::score;
///
/// assert_eq!(score(1, 90, 80, 70).unwrap(), 165.0);
/// assert_eq!(score(2, 100, 100, 100).unwrap(), 200.0);
/// assert!(score(3, 101, 0, 0).is_err());
/// ```
pub fn score(ordinal: usize, maths: i32, physics: i32, chemistry: i32) -> Result<f32, ScoreError> {
    for (subject, mark) in Subject::ALL.into_iter().zip([maths, physics, chemistry]) {
        if !(MIN_MARK..=MAX_MARK).contains(&mark) {
            return Err(ScoreError::OutOfRangeMark {
                ordinal,
                subject,
                mark,
            });
        }
    }

    let total = maths as f32 + physics as f32 / 2.0 + chemistry as f32 / 2.0;
    if total > MAX_TOTAL {
        return Err(ScoreError::TotalExceedsMaximum { ordinal, total });
    }

    Ok(total)
}

/// One applicant's marks together with their validated composite total.
///
/// Records only exist for the lifetime of a single request; they are never
/// shared between sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicantRecord {
    ordinal: usize,
    maths: i32,
    physics: i32,
    chemistry: i32,
    total: f32,
}

impl ApplicantRecord {
    /// Validates the marks and builds a record for the applicant at `ordinal`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ScoreError`] from [`score`].
    pub fn new(ordinal: usize, maths: i32, physics: i32, chemistry: i32) -> Result<Self, ScoreError> {
        let total = score(ordinal, maths, physics, chemistry)?;
        Ok(Self {
            ordinal,
            maths,
            physics,
            chemistry,
            total,
        })
    }

    /// 1-based position of the applicant in submission order.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the raw mark for `subject`.
    pub fn mark(&self, subject: Subject) -> i32 {
        match subject {
            Subject::Mathematics => self.maths,
            Subject::Physics => self.physics,
            Subject::Chemistry => self.chemistry,
        }
    }

    /// The three raw marks in wire order.
    pub fn marks(&self) -> [i32; 3] {
        [self.maths, self.physics, self.chemistry]
    }

    /// The composite total.
    pub fn total(&self) -> f32 {
        self.total
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_weights_physics_and_chemistry_at_half() {
        assert_eq!(score(1, 90, 80, 70).unwrap(), 165.0);
        assert_eq!(score(1, 50, 40, 30).unwrap(), 85.0);
    }

    #[test]
    fn test_score_keeps_half_marks_unrounded() {
        // 0 + 1/2 + 0/2 = 0.5
        assert_eq!(score(1, 0, 1, 0).unwrap(), 0.5);
        assert_eq!(score(1, 10, 33, 0).unwrap(), 26.5);
    }

    #[test]
    fn test_score_all_zero_is_zero() {
        assert_eq!(score(1, 0, 0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_score_perfect_marks_reach_maximum_without_error() {
        let total = score(1, 100, 100, 100).expect("200.0 is within the limit");
        assert_eq!(total, MAX_TOTAL);
    }

    #[test]
    fn test_score_rejects_mark_above_range() {
        let err = score(4, 100, 101, 100).unwrap_err();
        assert_eq!(
            err,
            ScoreError::OutOfRangeMark {
                ordinal: 4,
                subject: Subject::Physics,
                mark: 101,
            }
        );
    }

    #[test]
    fn test_score_rejects_negative_mark() {
        let err = score(2, 50, 50, -1).unwrap_err();
        assert_eq!(
            err,
            ScoreError::OutOfRangeMark {
                ordinal: 2,
                subject: Subject::Chemistry,
                mark: -1,
            }
        );
    }

    #[test]
    fn test_score_reports_first_bad_subject_in_wire_order() {
        // Both maths and chemistry are invalid; maths is checked first.
        let err = score(7, -5, 50, 500).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::OutOfRangeMark {
                subject: Subject::Mathematics,
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_range_message_names_applicant_and_subject() {
        let err = score(3, 0, 0, 150).unwrap_err();
        assert_eq!(
            err.to_string(),
            "applicant 3: chemistry mark 150 is outside 0..=100"
        );
    }

    #[test]
    fn test_applicant_record_exposes_marks_and_total() {
        let record = ApplicantRecord::new(5, 90, 80, 70).unwrap();
        assert_eq!(record.ordinal(), 5);
        assert_eq!(record.marks(), [90, 80, 70]);
        assert_eq!(record.mark(Subject::Physics), 80);
        assert_eq!(record.total(), 165.0);
    }

    #[test]
    fn test_applicant_record_rejects_invalid_marks() {
        assert!(ApplicantRecord::new(1, 100, 100, 101).is_err());
    }

    #[test]
    fn test_subject_display_uses_lowercase_name() {
        assert_eq!(Subject::Mathematics.to_string(), "mathematics");
        assert_eq!(Subject::ALL.len(), 3);
    }
}
