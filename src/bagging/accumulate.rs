use log::warn;

use crate::error::{BaggingError, FailureReason, SampleFailure};
use crate::model::{FitError, FitResult};

/// Accepted output of one replicate.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Replicate {
    pub coefficients: Vec<f64>,
    pub fitted_values: Vec<f64>,
}

/// Per-run accumulation target.
///
/// One slot per requested replicate, written at most once. Empty slots belong
/// to discarded replicates and are skipped by the reduction.
#[derive(Debug, Clone)]
pub(crate) struct Accumulator {
    n: usize,
    slots: Vec<Option<Replicate>>,
    selected: Vec<usize>,
    failures: Vec<SampleFailure>,
}

impl Accumulator {
    pub fn new(n: usize, replicates: usize) -> Self {
        Self {
            n,
            slots: vec![None; replicates],
            selected: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Validate and store the outcome of replicate `index`.
    ///
    /// Malformed or failed fits are logged and recorded, never returned as
    /// errors. Only a coefficient length that disagrees with earlier accepted
    /// replicates aborts the run.
    pub fn record(
        &mut self,
        index: usize,
        outcome: Result<FitResult, FitError>,
    ) -> Result<(), BaggingError> {
        let fit = match outcome.map_err(FailureReason::from).and_then(|fit| self.validate(fit)) {
            Ok(fit) => fit,
            Err(reason) => {
                warn!("bootstrap replicate {index} discarded: {reason}");
                self.failures.push(SampleFailure {
                    replicate: index,
                    reason,
                });
                return Ok(());
            }
        };

        if self.selected.is_empty() {
            self.selected = vec![0; fit.coefficients.len()];
        } else if self.selected.len() != fit.coefficients.len() {
            return Err(BaggingError::InconsistentCoefficients {
                replicate: index,
                expected: self.selected.len(),
                found: fit.coefficients.len(),
            });
        }

        for (count, &beta) in self.selected.iter_mut().zip(&fit.coefficients) {
            if beta != 0.0 {
                *count += 1;
            }
        }

        self.slots[index] = Some(Replicate {
            coefficients: fit.coefficients,
            fitted_values: fit.fitted_values,
        });
        Ok(())
    }

    fn validate(&self, fit: FitResult) -> Result<FitResult, FailureReason> {
        if fit.coefficients.is_empty() {
            return Err(FailureReason::MissingCoefficients);
        }
        if fit.fitted_values.len() != self.n {
            return Err(FailureReason::FittedLength {
                expected: self.n,
                found: fit.fitted_values.len(),
            });
        }
        Ok(fit)
    }

    pub fn observations(&self) -> usize {
        self.n
    }

    pub fn replicates(&self) -> usize {
        self.slots.len()
    }

    pub fn accepted(&self) -> impl Iterator<Item = &Replicate> {
        self.slots.iter().flatten()
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted().count()
    }

    /// Coefficient length fixed by the first accepted replicate.
    pub fn width(&self) -> usize {
        self.selected.len()
    }

    /// Non-zero counts per coefficient position.
    pub fn selected(&self) -> &[usize] {
        &self.selected
    }

    pub fn filled(&self) -> Vec<bool> {
        self.slots.iter().map(Option::is_some).collect()
    }

    pub fn into_failures(self) -> Vec<SampleFailure> {
        self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(coefficients: &[f64], fitted: &[f64]) -> Result<FitResult, FitError> {
        Ok(FitResult::new(coefficients.to_vec(), fitted.to_vec()))
    }

    #[test]
    fn accepts_well_formed_fits_into_their_slot() {
        let mut acc = Accumulator::new(2, 3);
        acc.record(2, ok(&[1.0, 0.0], &[0.5, 0.5])).unwrap();

        assert_eq!(acc.filled(), vec![false, false, true]);
        assert_eq!(acc.selected(), [1, 0]);
        assert_eq!(acc.width(), 2);
    }

    #[test]
    fn discards_malformed_fits() {
        let mut acc = Accumulator::new(2, 4);
        acc.record(0, ok(&[], &[0.5, 0.5])).unwrap();
        acc.record(1, ok(&[1.0], &[0.5])).unwrap();
        acc.record(2, Err(FitError::Numerical("singular".into()))).unwrap();
        acc.record(3, ok(&[1.0], &[0.5, 0.1])).unwrap();

        assert_eq!(acc.accepted_count(), 1);
        let failures = acc.into_failures();
        assert_eq!(failures.len(), 3);
        assert_eq!(failures[0].reason, FailureReason::MissingCoefficients);
        assert_eq!(
            failures[1].reason,
            FailureReason::FittedLength { expected: 2, found: 1 }
        );
        assert_eq!(failures[2].replicate, 2);
        assert!(matches!(failures[2].reason, FailureReason::Fit(_)));
    }

    #[test]
    fn inconsistent_coefficient_length_is_fatal() {
        let mut acc = Accumulator::new(1, 2);
        acc.record(0, ok(&[1.0, 2.0], &[0.0])).unwrap();
        assert_eq!(
            acc.record(1, ok(&[1.0], &[0.0])),
            Err(BaggingError::InconsistentCoefficients {
                replicate: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn selection_counts_sum_across_replicates() {
        let mut acc = Accumulator::new(1, 3);
        acc.record(0, ok(&[1.0, 0.0, -2.0], &[0.0])).unwrap();
        acc.record(1, ok(&[0.0, 0.0, 3.0], &[0.0])).unwrap();
        acc.record(2, ok(&[4.0, 0.0, 1.0], &[0.0])).unwrap();
        assert_eq!(acc.selected(), [2, 0, 3]);
    }
}
