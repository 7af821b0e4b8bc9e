//! Scalar reductions over slices of replicate estimates.

mod basic;
mod mean;
mod se;
mod student;

pub use basic::Variance;
pub use mean::Mean;
pub use se::NominalSE;
pub use student::StudentT;

/// A scalar reduction of `data`.
pub trait Statistic<D, T> {
    /// Evaluate on `data`.
    fn compute(&self, data: &D) -> T;
}
