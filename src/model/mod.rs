//! Model fitters that the bagging engine can wrap.
//!
//! The engine only ever sees [`ModelFitter`]; concrete strategies live in the
//! submodules and plain closures work as well.

mod lasso;
mod least_squares;
mod topk;

use nalgebra::DMatrix;
use thiserror::Error;

pub use lasso::Lasso;
pub use least_squares::LeastSquares;
pub use topk::{Selection, TopK};

/// Output of one model fit.
///
/// `coefficients` has length `p`, or `p + 1` with the intercept first when the
/// fitter estimates one. `fitted_values` aligns with the rows passed to the fit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FitResult {
    /// Estimated coefficients, intercept first when present.
    pub coefficients: Vec<f64>,
    /// Predictions on the rows that were fitted.
    pub fitted_values: Vec<f64>,
}

impl FitResult {
    /// Bundle one fit's output.
    pub fn new(coefficients: Vec<f64>, fitted_values: Vec<f64>) -> Self {
        Self {
            coefficients,
            fitted_values,
        }
    }
}

/// Why a fitter could not produce a [`FitResult`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// `y` and the rows of `X` disagree.
    #[error("dimension mismatch: X has {x_rows} rows but y has {y_len} elements")]
    DimensionMismatch {
        /// Rows of `X`.
        x_rows: usize,
        /// Length of `y`.
        y_len: usize,
    },

    /// Linear algebra failed on this sample.
    #[error("numerical failure: {0}")]
    Numerical(String),

    /// Iterative solver hit its sweep limit.
    #[error("coordinate descent did not converge after {iterations} sweeps")]
    NoConvergence {
        /// Sweeps performed.
        iterations: usize,
    },

    /// Fitter configuration is unusable.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Fits a linear model to `(y, X)` and predicts back onto the same rows.
pub trait ModelFitter {
    /// Fit on `(y, x)`, returning coefficients and in-sample predictions.
    fn fit(&self, y: &[f64], x: &DMatrix<f64>) -> Result<FitResult, FitError>;
}

impl<F> ModelFitter for F
where
    F: Fn(&[f64], &DMatrix<f64>) -> Result<FitResult, FitError>,
{
    fn fit(&self, y: &[f64], x: &DMatrix<f64>) -> Result<FitResult, FitError> {
        self(y, x)
    }
}

fn check_dimensions(y: &[f64], x: &DMatrix<f64>) -> Result<(), FitError> {
    if y.len() == x.nrows() {
        Ok(())
    } else {
        Err(FitError::DimensionMismatch {
            x_rows: x.nrows(),
            y_len: y.len(),
        })
    }
}
