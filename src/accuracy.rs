//!
//! Error rate between a true and an estimated state sequence
//!
use crate::error::{HmmError, Result};

///
/// Fraction of positions at which the two sequences differ.
///
/// Fails when the lengths differ, or when there are no positions to
/// score at all.
///
pub fn error_rate<S: PartialEq>(truth: &[S], estimate: &[S]) -> Result<f64> {
    if truth.len() != estimate.len() {
        return Err(HmmError::LengthMismatch {
            expected: truth.len(),
            actual: estimate.len(),
        });
    }
    if truth.is_empty() {
        return Err(HmmError::EmptyObservations);
    }
    let wrong = truth
        .iter()
        .zip(estimate.iter())
        .filter(|(a, b)| a != b)
        .count();
    Ok(wrong as f64 / truth.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&[0, 1, 2], &[0, 1, 2], 0.0 ; "identical")]
    #[test_case(&[0, 1, 2], &[0, 1, 0], 1.0 / 3.0 ; "one wrong")]
    #[test_case(&[0, 0], &[1, 1], 1.0 ; "all wrong")]
    fn error_rate_counts_mismatches(truth: &[u8], estimate: &[u8], expected: f64) {
        assert_relative_eq!(error_rate(truth, estimate).unwrap(), expected);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        assert!(matches!(
            error_rate(&[0, 1], &[0]),
            Err(HmmError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn empty_sequences_are_an_error() {
        let empty: &[u8] = &[];
        assert!(matches!(
            error_rate(empty, empty),
            Err(HmmError::EmptyObservations)
        ));
    }
}
