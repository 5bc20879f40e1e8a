pub mod charts;
pub mod page;
pub mod stats;
pub mod svg;

use std::collections::{BTreeMap, HashMap};

use crate::input::dataset::ReferenceDataset;
use crate::model::Artifacts;
use crate::model::schema::{SLIDER_DEFAULT, SLIDER_MAX, SLIDER_MIN};
use crate::pipeline::feature_row::{MissingFieldPolicy, build_row};
use crate::pipeline::{PipelineOptions, PredictError, assess};
use charts::{ComparisonChart, build_comparison_charts};
use page::{PageParts, render_page};
use svg::{RenderError, level_rgb, render_comparison, render_factor_bars, render_gauge};

/// Reference charts computed once from the dataset. Per request only the prediction
/// and the overlay markers are recomputed.
#[derive(Debug, Clone)]
pub struct Dashboard {
    charts: Vec<ComparisonChart>,
}

impl Dashboard {
    pub fn build(dataset: &ReferenceDataset) -> Self {
        let charts = build_comparison_charts(dataset);
        tracing::info!(charts = charts.len(), rows = dataset.len(), "dashboard charts prepared");
        Self { charts }
    }

    pub fn render(
        &self,
        artifacts: &Artifacts,
        options: &PipelineOptions,
        values: &BTreeMap<String, i64>,
        form_action: &str,
    ) -> Result<String, PredictError> {
        let row = build_row(
            &artifacts.features,
            values,
            MissingFieldPolicy::Default(SLIDER_DEFAULT),
        )?;
        let assessment = assess(artifacts, &row, options.factor_policy)?;

        let chart_svgs = self
            .charts
            .iter()
            .map(|chart| {
                let markers = chart.markers(assessment.stress_level, values);
                render_comparison(chart, &markers)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(internal)?;
        let gauge_svg = render_gauge(assessment.risk_score, level_rgb(assessment.stress_level))
            .map_err(internal)?;
        let factors_svg = render_factor_bars(&assessment.factors).map_err(internal)?;

        Ok(render_page(&PageParts {
            features: &artifacts.features,
            values,
            assessment: &assessment,
            gauge_svg,
            factors_svg,
            chart_svgs,
            form_action,
        }))
    }
}

fn internal(err: RenderError) -> PredictError {
    PredictError::Internal(err.to_string())
}

/// Slider positions from query parameters. Absent sliders sit at their default.
pub fn slider_values(
    features: &[String],
    query: &HashMap<String, String>,
) -> Result<BTreeMap<String, i64>, PredictError> {
    if let Some(unknown) = query.keys().find(|k| !features.contains(k)) {
        return Err(PredictError::Validation(format!("unknown field: {unknown}")));
    }

    let mut values = BTreeMap::new();
    for name in features {
        let value = match query.get(name) {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                PredictError::Validation(format!("{name} must be an integer, got {raw:?}"))
            })?,
            None => SLIDER_DEFAULT,
        };
        if !(SLIDER_MIN..=SLIDER_MAX).contains(&value) {
            return Err(PredictError::Validation(format!(
                "{name} must be between {SLIDER_MIN} and {SLIDER_MAX}, got {value}"
            )));
        }
        values.insert(name.clone(), value);
    }
    Ok(values)
}

#[cfg(test)]
#[path = "../../tests/src_inline/dashboard/mod.rs"]
mod tests;
