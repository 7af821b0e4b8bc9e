use num_traits::{Float, FromPrimitive};

use super::Statistic;

/// Arithmetic mean with **Kahan summation**.
///
/// Replicate counts in the thousands and coefficients of mixed magnitude make
/// naive accumulation drift; compensated summation keeps the bagged mean exact
/// when every replicate reports the same value.
#[derive(Clone, Copy, Default)]
pub struct Mean;

impl<D, T> Statistic<D, T> for Mean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> T {
        let slice: &[T] = data.as_ref();
        let Some(&shift) = slice.first() else {
            return T::nan();
        };

        // Sum deviations from the first element so constant input is returned exactly
        let mut sum = T::zero();
        let mut c = T::zero();

        for &x in slice {
            let y = (x - shift) - c;
            let t = sum + y;
            c = (t - sum) - y;
            sum = t;
        }

        match T::from_usize(slice.len()) {
            Some(n) => shift + sum / n,
            None => T::nan(),
        }
    }
}
