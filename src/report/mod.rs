pub mod json;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::pipeline::Assessment;

/// Wire shape of a prediction, shared by the HTTP API and `predict --format json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub stress_level: String,
    pub risk_score: f64,
    pub top_factors: Vec<String>,
    pub advice: String,
}

impl From<&Assessment> for PredictionReport {
    fn from(a: &Assessment) -> Self {
        Self {
            stress_level: a.stress_level.to_string(),
            risk_score: a.risk_score,
            top_factors: a.top_factor_names(),
            advice: a.advice.clone(),
        }
    }
}

pub fn format_percent(v: f64) -> String {
    format!("{:.2}%", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
