pub mod advice;
pub mod factors;
pub mod feature_row;
pub mod predict;

use serde::Serialize;

use crate::model::Artifacts;
use crate::model::schema::StressLevel;
use advice::compose_advice;
use factors::{Factor, FactorPolicy, rank_factors};
use feature_row::FeatureRow;
use predict::predict;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// The caller sent something the model cannot use.
    #[error("{0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub factor_policy: FactorPolicy,
    /// Reject requests with missing fields instead of defaulting them.
    pub strict_fields: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            factor_policy: FactorPolicy::InputScaled,
            strict_fields: false,
        }
    }
}

/// Everything one prediction produces. Lives for a single request or render.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub stress_level: StressLevel,
    pub risk_score: f64,
    pub probabilities: Vec<(StressLevel, f64)>,
    pub factors: Vec<Factor>,
    pub advice: String,
    pub defaulted: Vec<String>,
}

impl Assessment {
    pub fn top_factor_names(&self) -> Vec<String> {
        self.factors.iter().map(|f| f.name.clone()).collect()
    }
}

/// Row -> prediction -> ranked factors -> advice.
pub fn assess(
    artifacts: &Artifacts,
    row: &FeatureRow,
    policy: FactorPolicy,
) -> Result<Assessment, PredictError> {
    let prediction = predict(&artifacts.classifier, row)?;
    let factors = rank_factors(
        &artifacts.features,
        artifacts.classifier.explanation_weights(),
        row,
        policy,
    );
    let names: Vec<String> = factors.iter().map(|f| f.name.clone()).collect();
    let advice = compose_advice(prediction.label, &names);

    tracing::debug!(
        label = %prediction.label,
        risk_score = prediction.risk_score,
        factors = ?names,
        "assessment complete"
    );

    Ok(Assessment {
        stress_level: prediction.label,
        risk_score: prediction.risk_score,
        probabilities: artifacts
            .classifier
            .classes()
            .iter()
            .copied()
            .zip(prediction.probabilities)
            .collect(),
        factors,
        advice,
        defaulted: row.defaulted().to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/assess.rs"]
mod tests;
