//! Bootstrap aggregation of a [`ModelFitter`].
//!
//! A run draws `R` bootstrap samples from one random source, fits the model on
//! each resampled `(y, X)` pair, keeps the replicates whose output is
//! well-formed and reduces them to a [`BaggingSummary`]. Replicates that fail
//! are logged and listed on the summary; the run only fails when none succeed.

mod accumulate;
mod summary;

use log::debug;
use nalgebra::DMatrix;
use rand::Rng;

use crate::error::BaggingError;
use crate::model::ModelFitter;
use crate::resample::{Bootstrap, BootstrapSample};
use crate::sample::Dataset;
use accumulate::Accumulator;

pub use summary::{BaggingSummary, INTERCEPT};

/// Default number of bootstrap replicates.
pub const DEFAULT_REPLICATES: usize = 100;

/// Bagging engine around a model fitter.
#[derive(Debug, Clone)]
pub struct Bagging<M> {
    fitter: M,
    replicates: usize,
}

impl<M: ModelFitter> Bagging<M> {
    /// Bag `fitter` with [`DEFAULT_REPLICATES`] replicates.
    pub fn new(fitter: M) -> Self {
        Self {
            fitter,
            replicates: DEFAULT_REPLICATES,
        }
    }

    /// Number of bootstrap replicates `R`.
    #[must_use]
    pub fn replicates(mut self, replicates: usize) -> Self {
        self.replicates = replicates;
        self
    }

    /// The wrapped fitter.
    pub fn fitter(&self) -> &M {
        &self.fitter
    }

    /// Run all replicates sequentially.
    pub fn run<R: Rng + ?Sized>(
        &self,
        data: &Dataset,
        rng: &mut R,
    ) -> Result<BaggingSummary, BaggingError> {
        let samples = self.draw(data, rng)?;
        let mut acc = Accumulator::new(data.len(), self.replicates);

        for (i, sample) in samples.iter().enumerate() {
            let (y, x) = data.resample(sample);
            acc.record(i, self.fitter.fit(&y, &x))?;
        }

        self.finish(acc, data)
    }

    /// Run the fits on the rayon pool.
    ///
    /// Samples are drawn up front from `rng` exactly as in [`Bagging::run`] and
    /// results are recorded in replicate order, so both produce the same summary.
    #[cfg(feature = "rayon")]
    pub fn run_par<R: Rng + ?Sized>(
        &self,
        data: &Dataset,
        rng: &mut R,
    ) -> Result<BaggingSummary, BaggingError>
    where
        M: Sync,
    {
        use rayon::prelude::*;

        let samples = self.draw(data, rng)?;
        let outcomes: Vec<_> = samples
            .par_iter()
            .map(|sample| {
                let (y, x) = data.resample(sample);
                self.fitter.fit(&y, &x)
            })
            .collect();

        let mut acc = Accumulator::new(data.len(), self.replicates);
        for (i, outcome) in outcomes.into_iter().enumerate() {
            acc.record(i, outcome)?;
        }

        self.finish(acc, data)
    }

    fn draw<R: Rng + ?Sized>(
        &self,
        data: &Dataset,
        rng: &mut R,
    ) -> Result<Vec<BootstrapSample>, BaggingError> {
        if self.replicates == 0 {
            return Err(BaggingError::NoReplicates);
        }
        let bootstrap = Bootstrap::new(data.len())?;
        debug!(
            "bagging {} replicates over n = {}, p = {}",
            self.replicates,
            data.len(),
            data.predictors()
        );
        Ok(bootstrap.samples(rng).take(self.replicates).collect())
    }

    fn finish(&self, acc: Accumulator, data: &Dataset) -> Result<BaggingSummary, BaggingError> {
        let summary = summary::reduce(acc, data.names())?;
        debug!(
            "bagging finished: {} of {} replicates accepted",
            summary.accepted(),
            summary.replicates()
        );
        Ok(summary)
    }
}

/// Bag `fitter` over `R = replicates` bootstrap samples of `(y, x)`.
pub fn bagging_perform<M, R>(
    y: &[f64],
    x: &DMatrix<f64>,
    fitter: M,
    replicates: usize,
    rng: &mut R,
) -> Result<BaggingSummary, BaggingError>
where
    M: ModelFitter,
    R: Rng + ?Sized,
{
    let data = Dataset::new(y.to_vec(), x.clone())?;
    Bagging::new(fitter).replicates(replicates).run(&data, rng)
}
