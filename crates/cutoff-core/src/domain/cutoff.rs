//! Cutoff selection.
//!
//! Seats are filled from the top scorer downwards; the cutoff is the total of
//! the applicant who takes the last seat.  Ties are not broken: every
//! applicant whose total equals the cutoff is admitted, so a tie straddling
//! the seat boundary admits more applicants than there are seats.

use thiserror::Error;

/// Errors raised by [`cutoff_mark`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CutoffError {
    /// The seat count is zero or larger than the number of applicants.
    #[error("seat count {seats} is invalid for {applicants} applicants")]
    InvalidSeatCount { seats: usize, applicants: usize },
}

/// Returns the `seats`-th highest value in `totals` (1-indexed).
///
/// `totals` is left untouched; selection runs on a private copy.
///
/// # Errors
///
/// Returns [`CutoffError::InvalidSeatCount`] unless `0 < seats <= totals.len()`.
///
/// # Examples
///
/// ```rust
/// use cutoff_core::cutoff_mark;
///
/// let totals = [165.0, 200.0, 85.0];
/// assert_eq!(cutoff_mark(&totals, 2).unwrap(), 165.0);
/// ```
pub fn cutoff_mark(totals: &[f32], seats: usize) -> Result<f32, CutoffError> {
    if seats == 0 || seats > totals.len() {
        return Err(CutoffError::InvalidSeatCount {
            seats,
            applicants: totals.len(),
        });
    }

    let mut ranked = totals.to_vec();
    // Descending order: after selection, index `seats - 1` holds the value a
    // full descending sort would put there.
    let (_, boundary, _) = ranked.select_nth_unstable_by(seats - 1, |a, b| b.total_cmp(a));
    Ok(*boundary)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cutoff_is_second_highest_for_two_seats() {
        let totals = [165.0, 200.0, 85.0];
        assert_eq!(cutoff_mark(&totals, 2).unwrap(), 165.0);
    }

    #[test]
    fn test_cutoff_with_one_seat_is_maximum() {
        let totals = [12.5, 99.0, 40.0, 98.5];
        assert_eq!(cutoff_mark(&totals, 1).unwrap(), 99.0);
    }

    #[test]
    fn test_cutoff_with_all_seats_is_minimum() {
        let totals = [12.5, 99.0, 40.0, 98.5];
        assert_eq!(cutoff_mark(&totals, 4).unwrap(), 12.5);
    }

    #[test]
    fn test_cutoff_single_applicant() {
        assert_eq!(cutoff_mark(&[77.0], 1).unwrap(), 77.0);
    }

    #[test]
    fn test_cutoff_tie_inside_boundary() {
        // Ranks 2 and 3 share 170; the third seat lands on the tie.
        let totals = [180.0, 170.0, 170.0, 160.0];
        assert_eq!(cutoff_mark(&totals, 3).unwrap(), 170.0);
    }

    #[test]
    fn test_cutoff_tie_straddling_boundary_is_not_deduplicated() {
        let totals = [180.0, 170.0, 170.0, 170.0];
        let cutoff = cutoff_mark(&totals, 2).unwrap();
        assert_eq!(cutoff, 170.0);

        // All four clear the bar even though only two seats exist.
        let passing = totals.iter().filter(|t| **t >= cutoff).count();
        assert_eq!(passing, 4);
    }

    #[test]
    fn test_cutoff_tie_below_top_admits_three_for_two_seats() {
        let totals = [160.0, 170.0, 170.0, 170.0];
        let cutoff = cutoff_mark(&totals, 2).unwrap();
        assert_eq!(cutoff, 170.0);
        assert_eq!(totals.iter().filter(|t| **t >= cutoff).count(), 3);
    }

    #[test]
    fn test_cutoff_does_not_reorder_input() {
        let totals = vec![10.0, 30.0, 20.0];
        let _ = cutoff_mark(&totals, 2).unwrap();
        assert_eq!(totals, vec![10.0, 30.0, 20.0]);
    }

    #[test]
    fn test_cutoff_rejects_zero_seats() {
        let err = cutoff_mark(&[1.0, 2.0], 0).unwrap_err();
        assert_eq!(
            err,
            CutoffError::InvalidSeatCount {
                seats: 0,
                applicants: 2,
            }
        );
    }

    #[test]
    fn test_cutoff_rejects_more_seats_than_applicants() {
        let err = cutoff_mark(&[1.0, 2.0], 3).unwrap_err();
        assert!(matches!(err, CutoffError::InvalidSeatCount { seats: 3, .. }));
    }

    #[test]
    fn test_cutoff_rejects_empty_totals() {
        assert!(cutoff_mark(&[], 1).is_err());
    }
}
