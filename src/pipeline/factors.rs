use serde::Serialize;

use crate::pipeline::feature_row::FeatureRow;

pub const TOP_FACTORS: usize = 3;

/// How a feature's contribution is measured before ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FactorPolicy {
    /// `coefficient * input value`
    InputScaled,
    /// coefficient alone, independent of the input
    Raw,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub name: String,
    pub impact: f64,
}

/// Top features by descending absolute impact. Ties keep feature order.
pub fn rank_factors(
    features: &[String],
    weights: &[f64],
    row: &FeatureRow,
    policy: FactorPolicy,
) -> Vec<Factor> {
    let mut factors: Vec<Factor> = features
        .iter()
        .zip(weights)
        .zip(row.values())
        .map(|((name, &w), &v)| Factor {
            name: name.clone(),
            impact: match policy {
                FactorPolicy::InputScaled => w * v as f64,
                FactorPolicy::Raw => w,
            },
        })
        .collect();

    // sort_by is stable
    factors.sort_by(|a, b| b.impact.abs().total_cmp(&a.impact.abs()));
    factors.truncate(TOP_FACTORS);
    factors
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/factors.rs"]
mod tests;
