mod read;

use nalgebra::DMatrix;

use crate::BaggingError;
use crate::resample::BootstrapSample;

pub use read::DatasetError;

/// Paired response vector and predictor matrix.
///
/// `x` is `n × p`, one row per observation, one column per named predictor.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    y: Vec<f64>,
    x: DMatrix<f64>,
    names: Vec<String>,
}

impl Dataset {
    /// Create a dataset, naming predictors `x1..xp`.
    pub fn new(y: Vec<f64>, x: DMatrix<f64>) -> Result<Self, BaggingError> {
        if y.len() != x.nrows() {
            return Err(BaggingError::DimensionMismatch {
                x_rows: x.nrows(),
                y_len: y.len(),
            });
        }
        if y.is_empty() {
            return Err(BaggingError::EmptyDataset);
        }

        let names = (1..=x.ncols()).map(|j| format!("x{j}")).collect();
        Ok(Self { y, x, names })
    }

    /// Replace predictor names.
    pub fn with_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, BaggingError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.x.ncols() {
            return Err(BaggingError::ColumnNames {
                names: names.len(),
                columns: self.x.ncols(),
            });
        }
        self.names = names;
        Ok(self)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Always `false` for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Number of predictors.
    pub fn predictors(&self) -> usize {
        self.x.ncols()
    }

    /// Response vector `y`.
    pub fn response(&self) -> &[f64] {
        &self.y
    }

    /// Design matrix `X`, `n × p`.
    pub fn design(&self) -> &DMatrix<f64> {
        &self.x
    }

    /// Predictor names, one per column of `X`.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Project `y` and the rows of `X` onto the sample's indices.
    pub fn resample(&self, sample: &BootstrapSample) -> (Vec<f64>, DMatrix<f64>) {
        let indices = sample.indices();
        let y = indices.iter().map(|&i| self.y[i]).collect();
        let x = self.x.select_rows(indices);
        (y, x)
    }

    /// Keep only the given predictor columns, in the given order.
    ///
    /// # Errors
    ///
    /// [`BaggingError::ColumnIndex`] when an index is not a predictor column.
    pub fn select_columns(&self, columns: &[usize]) -> Result<Self, BaggingError> {
        let names = columns
            .iter()
            .map(|&j| {
                self.names.get(j).cloned().ok_or(BaggingError::ColumnIndex {
                    index: j,
                    columns: self.x.ncols(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            y: self.y.clone(),
            x: self.x.select_columns(columns),
            names,
        })
    }
}
