use std::fmt::{self, Display, Formatter};

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::*;

use crate::BaggingSummary;

fn format_p(p: f64) -> String {
    if p.is_nan() {
        "NA".to_string()
    } else if p < 0.0001 {
        "< 0.0001".to_string()
    } else {
        format!("{p:.4}")
    }
}

fn format_value(x: f64) -> String {
    if x.is_nan() {
        "NA".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "Inf".to_string() } else { "-Inf".to_string() }
    } else if x != 0.0 && (x.abs() >= 1e5 || x.abs() < 1e-4) {
        format!("{x:.3e}")
    } else {
        format!("{x:.4}")
    }
}

/// Conventional significance codes.
fn stars(p: f64) -> &'static str {
    if p.is_nan() {
        ""
    } else if p < 0.001 {
        "***"
    } else if p < 0.01 {
        "**"
    } else if p < 0.05 {
        "*"
    } else if p < 0.1 {
        "."
    } else {
        ""
    }
}

impl BaggingSummary {
    /// Render the summary as a coefficient table.
    pub fn display(&self) -> String {
        let mut title_table = Table::new();
        title_table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .add_row(vec![
                Cell::new(format!(
                    "Bagged coefficients (R = {}, accepted {}, df = {})",
                    self.replicates(),
                    self.accepted(),
                    self.df()
                ))
                .set_alignment(CellAlignment::Center),
            ]);

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(
                ["Predictor", "Estimate", "Std. Error", "t value", "Pr(>|t|)", "", "Importance"]
                    .into_iter()
                    .map(|h| Cell::new(h).set_alignment(CellAlignment::Center))
                    .collect::<Vec<_>>(),
            );

        for (j, name) in self.names().iter().enumerate() {
            table.add_row(vec![
                Cell::new(name).set_alignment(CellAlignment::Left),
                Cell::new(format_value(self.coefficients[j])).set_alignment(CellAlignment::Right),
                Cell::new(format_value(self.standard_error[j])).set_alignment(CellAlignment::Right),
                Cell::new(format_value(self.t_values[j])).set_alignment(CellAlignment::Right),
                Cell::new(format_p(self.p_values[j])).set_alignment(CellAlignment::Right),
                Cell::new(stars(self.p_values[j])).set_alignment(CellAlignment::Left),
                Cell::new(format!("{:.2}", self.variable_importance[j]))
                    .set_alignment(CellAlignment::Right),
            ]);
        }

        format!("{title_table}\n{table}")
    }
}

impl Display for BaggingSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
