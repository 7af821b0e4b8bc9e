use thiserror::Error;

use crate::model::FitError;

/// Errors that abort a bagging run.
///
/// Per-replicate fit failures are not represented here: they are absorbed by the
/// engine and reported through [`SampleFailure`] records on the summary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BaggingError {
    /// `y` and the rows of `X` disagree.
    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch {
        /// Rows of `X`.
        x_rows: usize,
        /// Length of `y`.
        y_len: usize,
    },

    /// No observations to resample.
    #[error("dataset contains no observations")]
    EmptyDataset,

    /// `R = 0`.
    #[error("number of bootstrap replicates must be positive")]
    NoReplicates,

    /// Name count differs from the predictor count.
    #[error("{names} column names given for {columns} predictors")]
    ColumnNames {
        /// Names supplied.
        names: usize,
        /// Predictors in `X`.
        columns: usize,
    },

    /// A selected column does not exist.
    #[error("column {index} out of range for {columns} predictors")]
    ColumnIndex {
        /// Offending index.
        index: usize,
        /// Predictors in `X`.
        columns: usize,
    },

    /// Accepted replicates disagree on the coefficient count.
    #[error("replicate {replicate} returned {found} coefficients, earlier replicates returned {expected}")]
    InconsistentCoefficients {
        /// Zero-based replicate index.
        replicate: usize,
        /// Length fixed by the first accepted replicate.
        expected: usize,
        /// Length this replicate returned.
        found: usize,
    },

    /// Not a single replicate was usable.
    #[error("all {replicates} bootstrap replicates failed")]
    AllSamplesFailed {
        /// Requested `R`.
        replicates: usize,
    },
}

/// Why a single replicate was discarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FailureReason {
    /// Empty coefficient vector.
    #[error("fitter returned no coefficients")]
    MissingCoefficients,

    /// Fitted values do not cover every observation.
    #[error("fitter returned {found} fitted values, expected {expected}")]
    FittedLength {
        /// Observations `n`.
        expected: usize,
        /// Values returned.
        found: usize,
    },

    /// The fitter itself reported an error.
    #[error(transparent)]
    Fit(#[from] FitError),
}

/// Diagnostic record of a discarded replicate.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleFailure {
    /// Zero-based replicate index.
    pub replicate: usize,
    /// What was wrong with the replicate's output.
    pub reason: FailureReason,
}
