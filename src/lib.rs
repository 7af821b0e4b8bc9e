//! Bootstrap aggregation ("bagging") of linear models.
//!
//! [`Bagging`] wraps any [`ModelFitter`] and reports cross-replicate mean
//! coefficients, nominal bootstrap standard errors, t statistics, two-sided
//! p-values, averaged predictions and selection-frequency importance.
//! [`LeastSquares`], [`Lasso`] and the SVD-based [`TopK`] selector are the
//! modelling pieces usually plugged into it.
//!
//! ```no_run
//! use bagging::{Bagging, Dataset, Lasso};
//! use rand::SeedableRng;
//!
//! let data = Dataset::read("mtcars.csv", "mpg")?;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let summary = Bagging::new(Lasso::new(0.1)).replicates(200).run(&data, &mut rng)?;
//! println!("{summary}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod bagging;
mod display;
mod error;
mod model;
mod resample;
mod sample;
mod statistics;

pub use crate::bagging::{bagging_perform, Bagging, BaggingSummary, DEFAULT_REPLICATES, INTERCEPT};
pub use crate::error::{BaggingError, FailureReason, SampleFailure};
pub use crate::model::{FitError, FitResult, Lasso, LeastSquares, ModelFitter, Selection, TopK};
pub use crate::resample::{Bootstrap, BootstrapIter, BootstrapSample};
pub use crate::sample::{Dataset, DatasetError};
pub use crate::statistics::{Mean, NominalSE, Statistic, StudentT, Variance};
pub use rand;
