use statrs::distribution::{ContinuousCDF, StudentsT};

/// Reference Student's t distribution for coefficient significance.
#[derive(Debug, Clone)]
pub struct StudentT {
    dist: Option<StudentsT>,
}

impl StudentT {
    /// Standard t with `df` degrees of freedom.
    ///
    /// Non-positive `df` gives a degenerate reference whose p-values are all NaN.
    pub fn new(df: i64) -> Self {
        let dist = (df > 0)
            .then(|| StudentsT::new(0.0, 1.0, df as f64).ok())
            .flatten();
        Self { dist }
    }

    /// `true` when `df ≤ 0`.
    pub fn is_degenerate(&self) -> bool {
        self.dist.is_none()
    }

    /// Two-sided tail probability `P(|T| ≥ |t|)`.
    pub fn two_sided(&self, t: f64) -> f64 {
        match &self.dist {
            Some(dist) if !t.is_nan() => (2.0 * dist.sf(t.abs())).min(1.0),
            _ => f64::NAN,
        }
    }
}
