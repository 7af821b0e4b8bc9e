use log::warn;
use serde::Serialize;

use super::accumulate::Accumulator;
use crate::error::{BaggingError, SampleFailure};
use crate::statistics::{Mean, NominalSE, Statistic, StudentT};

/// Label of the leading coefficient when a fitter reports an intercept.
pub const INTERCEPT: &str = "(Intercept)";

/// Cross-replicate summary of a bagging run.
///
/// Serializes as a mapping with the keys `coefficients`, `standard_error`,
/// `t_values`, `p_values`, `predictions` and `variable_importance`.
///
/// Degenerate statistics are reported in place as NaN: standard errors, t and
/// p values when fewer than two replicates were accepted, and p values when
/// `df = n − p − 1` is not positive. Importance is divided by the requested
/// replicate count, so discarded replicates bias it downwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaggingSummary {
    /// Mean coefficient over accepted replicates.
    pub coefficients: Vec<f64>,
    /// Replicate standard deviation over `sqrt(R)`.
    pub standard_error: Vec<f64>,
    /// `coefficients / standard_error`.
    pub t_values: Vec<f64>,
    /// Two-sided Student-t p-values on `df` degrees of freedom.
    pub p_values: Vec<f64>,
    /// Per-observation mean of the fitted values.
    pub predictions: Vec<f64>,
    /// Share of the `R` replicates with a non-zero coefficient.
    pub variable_importance: Vec<f64>,

    #[serde(skip)]
    pub(crate) names: Vec<String>,
    #[serde(skip)]
    pub(crate) replicates: usize,
    #[serde(skip)]
    pub(crate) accepted: usize,
    #[serde(skip)]
    pub(crate) df: i64,
    #[serde(skip)]
    pub(crate) filled: Vec<bool>,
    #[serde(skip)]
    pub(crate) failures: Vec<SampleFailure>,
}

impl BaggingSummary {
    /// Coefficient labels, `(Intercept)` first when present.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Requested replicate count `R`.
    pub fn replicates(&self) -> usize {
        self.replicates
    }

    /// Replicates whose fits were aggregated.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Residual degrees of freedom used for p-values.
    pub fn df(&self) -> i64 {
        self.df
    }

    /// Which columns of the `n × R` fitted-value matrix were filled.
    pub fn filled_columns(&self) -> &[bool] {
        &self.filled
    }

    /// Discarded replicates and why.
    pub fn failures(&self) -> &[SampleFailure] {
        &self.failures
    }
}

/// Reduce accumulated replicates to a summary.
///
/// `predictor_names` are the dataset's column names; an extra leading
/// coefficient is labelled as the intercept.
pub(crate) fn reduce(
    acc: Accumulator,
    predictor_names: &[String],
) -> Result<BaggingSummary, BaggingError> {
    let replicates = acc.replicates();
    let accepted = acc.accepted_count();
    if accepted == 0 {
        return Err(BaggingError::AllSamplesFailed { replicates });
    }

    let n = acc.observations();
    let p = predictor_names.len();
    let width = acc.width();

    let se_of = NominalSE::new(replicates);
    let mut coefficients: Vec<f64> = Vec::with_capacity(width);
    let mut standard_error: Vec<f64> = Vec::with_capacity(width);
    for j in 0..width {
        let column: Vec<f64> = acc.accepted().map(|r| r.coefficients[j]).collect();
        coefficients.push(Mean.compute(&column));
        standard_error.push(se_of.compute(&column));
    }

    if accepted < 2 {
        warn!("only {accepted} of {replicates} replicates accepted; standard errors are undefined");
    }

    let t_values: Vec<f64> = coefficients
        .iter()
        .zip(&standard_error)
        .map(|(mean, se)| mean / se)
        .collect();

    let df = n as i64 - p as i64 - 1;
    let reference = StudentT::new(df);
    if reference.is_degenerate() {
        warn!("non-positive residual degrees of freedom (n = {n}, p = {p}); p-values are undefined");
    }
    let p_values = t_values.iter().map(|&t| reference.two_sided(t)).collect();

    let mut buffer: Vec<f64> = Vec::with_capacity(accepted);
    let predictions = (0..n)
        .map(|i| {
            buffer.clear();
            buffer.extend(acc.accepted().map(|r| r.fitted_values[i]));
            Mean.compute(&buffer)
        })
        .collect();

    let variable_importance = acc
        .selected()
        .iter()
        .map(|&count| count as f64 / replicates as f64)
        .collect();

    let names = coefficient_names(predictor_names, width);
    let filled = acc.filled();

    Ok(BaggingSummary {
        coefficients,
        standard_error,
        t_values,
        p_values,
        predictions,
        variable_importance,
        names,
        replicates,
        accepted,
        df,
        filled,
        failures: acc.into_failures(),
    })
}

fn coefficient_names(predictors: &[String], width: usize) -> Vec<String> {
    if width == predictors.len() + 1 {
        std::iter::once(INTERCEPT.to_string())
            .chain(predictors.iter().cloned())
            .collect()
    } else if width == predictors.len() {
        predictors.to_vec()
    } else {
        (1..=width).map(|j| format!("b{j}")).collect()
    }
}
