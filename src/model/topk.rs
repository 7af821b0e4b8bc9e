use nalgebra::DMatrix;

use super::FitError;
use crate::{BaggingError, Dataset};

/// Top-K predictor selection from the right singular vectors of the centred design.
///
/// Each predictor is scored by the length of its loading vector over the
/// `components` leading singular directions, each loading weighted by its
/// singular value. The `k` highest-scoring predictors are kept.
#[derive(Debug, Clone, Copy)]
pub struct TopK {
    k: usize,
    components: usize,
}

/// Predictors kept by [`TopK`], best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Column indices into the scored design.
    pub indices: Vec<usize>,
    /// Predictor names, aligned with `indices`.
    pub names: Vec<String>,
    /// Loading scores, descending.
    pub scores: Vec<f64>,
}

impl Selection {
    /// Restrict a dataset to the selected predictors.
    ///
    /// # Errors
    ///
    /// [`BaggingError::ColumnIndex`] when `data` has fewer predictors than the
    /// dataset the selection was made on.
    pub fn apply(&self, data: &Dataset) -> Result<Dataset, BaggingError> {
        data.select_columns(&self.indices)
    }
}

impl TopK {
    /// Keep the `k` best predictors, scored on one component.
    pub fn new(k: usize) -> Self {
        Self { k, components: 1 }
    }

    /// Number of leading singular directions contributing to the score.
    #[must_use]
    pub fn components(mut self, components: usize) -> Self {
        self.components = components;
        self
    }

    /// Score the dataset's predictors and keep the best `k`.
    pub fn select(&self, data: &Dataset) -> Result<Selection, FitError> {
        let scores = self.scores(data.design())?;

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]).then(a.cmp(&b)));
        order.truncate(self.k);

        Ok(Selection {
            names: order.iter().map(|&j| data.names()[j].clone()).collect(),
            scores: order.iter().map(|&j| scores[j]).collect(),
            indices: order,
        })
    }

    /// Per-predictor loading scores, in column order.
    pub fn scores(&self, x: &DMatrix<f64>) -> Result<Vec<f64>, FitError> {
        let (n, p) = x.shape();
        if self.k == 0 || self.k > p {
            return Err(FitError::InvalidParameter(format!(
                "k must be in 1..={p}, got {}",
                self.k
            )));
        }
        if self.components == 0 {
            return Err(FitError::InvalidParameter(
                "at least one singular component is required".to_string(),
            ));
        }

        let mut centred = x.clone();
        for mut column in centred.column_iter_mut() {
            let mean = column.sum() / n as f64;
            column.add_scalar_mut(-mean);
        }

        let svd = centred.svd(false, true);
        let v_t = svd
            .v_t
            .ok_or_else(|| FitError::Numerical("SVD did not return right singular vectors".to_string()))?;
        let sigma = svd.singular_values;

        let mut leading: Vec<usize> = (0..sigma.len()).collect();
        leading.sort_by(|&a, &b| sigma[b].total_cmp(&sigma[a]));
        leading.truncate(self.components);

        Ok((0..p)
            .map(|j| {
                leading
                    .iter()
                    .map(|&c| (sigma[c] * v_t[(c, j)]).powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .collect())
    }
}
