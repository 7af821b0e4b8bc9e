use nalgebra::{DMatrix, DVector};

use super::{FitError, FitResult, ModelFitter, check_dimensions};

/// Singular values below this fraction of the largest are treated as zero.
const RANK_TOLERANCE: f64 = 1e-12;

/// Ordinary least squares via SVD.
///
/// Rank-deficient designs (a bootstrap sample that repeats too few rows, a
/// constant column) get the minimum-norm solution instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct LeastSquares {
    intercept: bool,
}

impl Default for LeastSquares {
    fn default() -> Self {
        Self { intercept: true }
    }
}

impl LeastSquares {
    /// OLS with an intercept.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the leading intercept coefficient.
    #[must_use]
    pub fn intercept(mut self, intercept: bool) -> Self {
        self.intercept = intercept;
        self
    }
}

impl ModelFitter for LeastSquares {
    fn fit(&self, y: &[f64], x: &DMatrix<f64>) -> Result<FitResult, FitError> {
        check_dimensions(y, x)?;

        let design = if self.intercept {
            x.clone().insert_column(0, 1.0)
        } else {
            x.clone()
        };
        if design.ncols() == 0 {
            return Err(FitError::InvalidParameter(
                "least squares needs at least one column".to_string(),
            ));
        }

        let svd = design.clone().svd(true, true);
        let eps = RANK_TOLERANCE * svd.singular_values.max();
        let beta = svd
            .solve(&DVector::from_column_slice(y), eps)
            .map_err(|e| FitError::Numerical(e.to_string()))?;

        let fitted = &design * &beta;

        Ok(FitResult::new(
            beta.iter().copied().collect(),
            fitted.iter().copied().collect(),
        ))
    }
}
