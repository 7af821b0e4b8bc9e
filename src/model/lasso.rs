use nalgebra::{DMatrix, DVector};

use super::{FitError, FitResult, ModelFitter, check_dimensions};

/// L1-penalised Gaussian linear regression.
///
/// Minimises
/// ```text
/// 1/(2n) · ‖y − β₀ − Xβ‖² + λ · ‖β‖₁
/// ```
/// by cyclic coordinate descent with soft-thresholding. With `standardize` on
/// (the default) the penalty applies to coefficients of unit-variance columns
/// and the reported coefficients are transformed back to the original scale.
/// The intercept is never penalised and, when present, leads the coefficient
/// vector.
#[derive(Debug, Clone, Copy)]
pub struct Lasso {
    penalty: f64,
    intercept: bool,
    standardize: bool,
    max_iter: usize,
    tolerance: f64,
}

impl Lasso {
    /// Lasso with penalty strength `λ`.
    pub fn new(penalty: f64) -> Self {
        Self {
            penalty,
            intercept: true,
            standardize: true,
            max_iter: 10_000,
            tolerance: 1e-9,
        }
    }

    /// Estimate an unpenalised intercept (default on).
    #[must_use]
    pub fn intercept(mut self, intercept: bool) -> Self {
        self.intercept = intercept;
        self
    }

    /// Penalise on unit-variance columns (default on).
    #[must_use]
    pub fn standardize(mut self, standardize: bool) -> Self {
        self.standardize = standardize;
        self
    }

    /// Upper bound on full coordinate sweeps.
    #[must_use]
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Convergence threshold on the largest coefficient change in a sweep.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Penalty strength `λ`.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}

fn soft_threshold(z: f64, gamma: f64) -> f64 {
    if z > gamma {
        z - gamma
    } else if z < -gamma {
        z + gamma
    } else {
        0.0
    }
}

impl ModelFitter for Lasso {
    fn fit(&self, y: &[f64], x: &DMatrix<f64>) -> Result<FitResult, FitError> {
        check_dimensions(y, x)?;
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(FitError::InvalidParameter(format!(
                "lasso penalty must be finite and non-negative, got {}",
                self.penalty
            )));
        }

        let (n, p) = x.shape();
        if n == 0 {
            return Err(FitError::InvalidParameter("lasso needs at least one observation".to_string()));
        }
        let nf = n as f64;

        let x_mean: DVector<f64> = if self.intercept {
            DVector::from_iterator(p, x.column_iter().map(|c| c.sum() / nf))
        } else {
            DVector::zeros(p)
        };
        let y_mean = if self.intercept { y.iter().sum::<f64>() / nf } else { 0.0 };

        // Working design: centred (with intercept) and optionally unit-scaled columns
        let mut z = x.clone();
        let mut scale = DVector::from_element(p, 1.0);
        for (j, mut column) in z.column_iter_mut().enumerate() {
            column.add_scalar_mut(-x_mean[j]);
            if self.standardize {
                let sd = (column.norm_squared() / nf).sqrt();
                if sd > 0.0 {
                    column /= sd;
                    scale[j] = sd;
                }
            }
        }
        let col_sq: Vec<f64> = z.column_iter().map(|c| c.norm_squared() / nf).collect();

        let mut beta = DVector::<f64>::zeros(p);
        let mut residual = DVector::from_iterator(n, y.iter().map(|v| v - y_mean));

        let mut converged = p == 0;
        for _ in 0..self.max_iter {
            let mut max_delta = 0.0_f64;
            for j in 0..p {
                if col_sq[j] == 0.0 {
                    continue;
                }
                let column = z.column(j);
                let old = beta[j];
                let rho = column.dot(&residual) / nf + col_sq[j] * old;
                let new = soft_threshold(rho, self.penalty) / col_sq[j];
                let delta = new - old;
                if delta != 0.0 {
                    residual.axpy(-delta, &column, 1.0);
                    beta[j] = new;
                    max_delta = max_delta.max(delta.abs());
                }
            }
            if max_delta <= self.tolerance {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(FitError::NoConvergence {
                iterations: self.max_iter,
            });
        }

        let slopes = beta.component_div(&scale);
        let fitted = x * &slopes;
        let mut coefficients = Vec::with_capacity(p + usize::from(self.intercept));
        let mut fitted_values: Vec<f64> = fitted.iter().copied().collect();
        if self.intercept {
            let b0 = y_mean - x_mean.dot(&slopes);
            coefficients.push(b0);
            fitted_values.iter_mut().for_each(|f| *f += b0);
        }
        coefficients.extend(slopes.iter().copied());

        Ok(FitResult::new(coefficients, fitted_values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeastSquares;
    use approx::assert_abs_diff_eq;

    fn design() -> (Vec<f64>, DMatrix<f64>) {
        let x = DMatrix::from_row_slice(8, 3, &[
            1.0, 0.5, -1.0,
            2.0, -0.3, 0.2,
            3.0, 1.1, 0.9,
            4.0, 0.0, -0.4,
            5.0, 2.2, 1.5,
            6.0, -1.0, 0.1,
            7.0, 0.7, -0.8,
            8.0, 1.9, 0.6,
        ]);
        let y = x
            .row_iter()
            .enumerate()
            .map(|(i, r)| 3.0 + 1.5 * r[0] - 2.0 * r[1] + if i % 2 == 0 { 0.1 } else { -0.1 })
            .collect();
        (y, x)
    }

    #[test]
    fn soft_threshold_shrinks_towards_zero() {
        assert_eq!(soft_threshold(3.0, 1.0), 2.0);
        assert_eq!(soft_threshold(-3.0, 1.0), -2.0);
        assert_eq!(soft_threshold(0.5, 1.0), 0.0);
    }

    #[test]
    fn zero_penalty_matches_least_squares() {
        let (y, x) = design();
        let lasso = Lasso::new(0.0).fit(&y, &x).unwrap();
        let ols = LeastSquares::new().fit(&y, &x).unwrap();

        for (a, b) in lasso.coefficients.iter().zip(&ols.coefficients) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        }
    }

    #[test]
    fn large_penalty_zeroes_all_slopes() {
        let (y, x) = design();
        let fit = Lasso::new(1e6).fit(&y, &x).unwrap();
        let y_mean = y.iter().sum::<f64>() / y.len() as f64;

        assert_abs_diff_eq!(fit.coefficients[0], y_mean, epsilon = 1e-12);
        assert!(fit.coefficients[1..].iter().all(|&b| b == 0.0));
        assert!(fit.fitted_values.iter().all(|&f| (f - y_mean).abs() < 1e-12));
    }

    #[test]
    fn orthonormal_design_is_soft_thresholded_least_squares() {
        // columns orthogonal with (1/n)·‖x_j‖² = 1, no intercept, no scaling
        let x = DMatrix::from_row_slice(4, 2, &[
            1.0, 1.0,
            1.0, -1.0,
            -1.0, 1.0,
            -1.0, -1.0,
        ]);
        let y = [3.0, 1.0, -1.0, -3.0];
        // OLS: b1 = 2, b2 = 1
        let fit = Lasso::new(0.5)
            .intercept(false)
            .standardize(false)
            .fit(&y, &x)
            .unwrap();
        assert_abs_diff_eq!(fit.coefficients[0], 1.5, epsilon = 1e-10);
        assert_abs_diff_eq!(fit.coefficients[1], 0.5, epsilon = 1e-10);
    }

    #[test]
    fn moderate_penalty_drops_weak_predictor() {
        let (y, x) = design();
        let fit = Lasso::new(0.4).fit(&y, &x).unwrap();
        assert_eq!(fit.coefficients.len(), 4);
        assert!(fit.coefficients[1] > 0.0);
        assert_eq!(fit.coefficients[3], 0.0);
    }

    #[test]
    fn constant_column_gets_zero() {
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 5.0, 2.0, 5.0, 3.0, 5.0, 4.0, 5.0]);
        let y = [1.0, 2.0, 3.0, 4.0];
        let fit = Lasso::new(0.01).fit(&y, &x).unwrap();
        assert_eq!(fit.coefficients[2], 0.0);
    }

    #[test]
    fn rejects_negative_penalty() {
        let (y, x) = design();
        assert!(matches!(
            Lasso::new(-1.0).fit(&y, &x),
            Err(FitError::InvalidParameter(_))
        ));
    }

    #[test]
    fn reports_non_convergence() {
        let (y, x) = design();
        assert_eq!(
            Lasso::new(0.0).max_iter(1).tolerance(0.0).fit(&y, &x),
            Err(FitError::NoConvergence { iterations: 1 })
        );
    }
}
