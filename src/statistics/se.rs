use num_traits::{Float, FromPrimitive};

use super::{Statistic, Variance};

/// Bootstrap standard error scaled by the *nominal* replicate count.
///
/// ```text
/// SE = sd({ θ̂*(b) }) / sqrt(R)
/// ```
/// where the standard deviation is taken over the accepted replicate estimates
/// only, but `R` is the number of replicates that were requested. Fewer than
/// two accepted estimates yield NaN.
#[derive(Debug, Clone, Copy)]
pub struct NominalSE {
    replicates: usize,
    variance: Variance,
}

impl NominalSE {
    /// Scale by `replicates`, the number requested.
    pub fn new(replicates: usize) -> Self {
        Self {
            replicates,
            variance: Variance::default(),
        }
    }
}

impl<D, T> Statistic<D, T> for NominalSE
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let var_est: T = self.variance.compute(data);
        if var_est.is_nan() || self.replicates == 0 {
            return T::nan();
        }

        let Some(r) = T::from_usize(self.replicates) else {
            return T::nan();
        };

        var_est.sqrt() / r.sqrt()
    }
}
