use num_traits::{Float, FromPrimitive};

use crate::statistics::{Mean, Statistic};

/// Variance with a delta degrees of freedom adjustment.
#[derive(Debug, Clone, Copy)]
pub struct Variance {
    /// Subtracted from the count in the divisor.
    pub ddof: usize,
}

impl Variance {
    /// Creates a new `Variance` estimator with the given degrees of freedom adjustment.
    ///
    /// - `ddof = 0`: population variance (biased)
    /// - `ddof = 1`: sample variance (Bessel's correction), the default
    pub fn new(ddof: usize) -> Self {
        Variance { ddof }
    }
}

impl Default for Variance {
    fn default() -> Self {
        Variance { ddof: 1 }
    }
}

impl<D, T> Statistic<D, T> for Variance
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let slice = data.as_ref();

        // Undefined below two observations, or when ddof eats every degree of freedom
        if slice.len() < 2 || slice.len() <= self.ddof {
            return T::nan();
        }

        let mean: T = Mean.compute(data);

        // Kahan summation for squared deviations
        let mut sq_sum = T::zero();
        let mut c2 = T::zero();
        for &x in slice {
            let dev = x - mean;
            let y = dev * dev - c2;
            let t = sq_sum + y;
            c2 = (t - sq_sum) - y;
            sq_sum = t;
        }

        T::from_usize(slice.len() - self.ddof).map_or_else(T::nan, |dof| sq_sum / dof)
    }
}
