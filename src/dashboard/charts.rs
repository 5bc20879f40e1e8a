use std::collections::BTreeMap;

use plotters::data::Quartiles;

use crate::dashboard::stats::{Trend, ols_fit};
use crate::input::dataset::{ReferenceDataset, STRESS_COLUMN};
use crate::model::schema::{StressLevel, display_name};

/// One box per stress level. `outliers` are the values beyond the 1.5 IQR fences.
#[derive(Debug, Clone)]
pub struct BoxGroup {
    pub level: StressLevel,
    pub quartiles: Quartiles,
    pub outliers: Vec<f64>,
}

impl BoxGroup {
    fn from_values(level: StressLevel, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let quartiles = Quartiles::new(values);
        let [low_fence, _, _, _, high_fence] = quartiles.values();
        let mut outliers: Vec<f64> = values
            .iter()
            .copied()
            .filter(|&v| (v as f32) < low_fence || (v as f32) > high_fence)
            .collect();
        outliers.sort_by(f64::total_cmp);
        outliers.dedup();
        Some(Self {
            level,
            quartiles,
            outliers,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BoxSeries {
    pub name: String,
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone)]
pub struct ScatterSeries {
    pub level: StressLevel,
    /// Distinct points only; the dataset is integer-valued and heavily overplotted.
    pub points: Vec<(f64, f64)>,
    pub trend: Option<Trend>,
}

#[derive(Debug, Clone)]
pub enum ChartData {
    Histogram { counts: Vec<(StressLevel, usize)> },
    Boxes { series: Vec<BoxSeries> },
    Scatter { series: Vec<ScatterSeries> },
}

/// Where the user's point goes on a chart.
#[derive(Debug, Clone)]
pub enum Overlay {
    /// At the predicted level on the category axis, on the baseline.
    PredictedLevel,
    /// One marker per feature, at (predicted level, input value).
    FeaturesAtPredicted(Vec<&'static str>),
    FeaturePair { x: &'static str, y: &'static str },
    FeatureVsPredictedLevel { x: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarkerX {
    Value(f64),
    Level(StressLevel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub name: String,
    pub x: MarkerX,
    pub y: f64,
    /// Index of the box series the marker belongs to, for grouped box plots.
    pub series: Option<usize>,
}

/// A precomputed reference chart. Only the overlay is evaluated per request.
#[derive(Debug, Clone)]
pub struct ComparisonChart {
    pub title: &'static str,
    pub x_label: String,
    pub y_label: String,
    pub data: ChartData,
    pub overlay: Overlay,
}

impl ComparisonChart {
    pub fn markers(&self, label: StressLevel, input: &BTreeMap<String, i64>) -> Vec<Marker> {
        let value = |name: &str| input.get(name).map(|&v| v as f64);
        match &self.overlay {
            Overlay::PredictedLevel => vec![Marker {
                name: "Your Prediction".to_string(),
                x: MarkerX::Level(label),
                y: 0.0,
                series: None,
            }],
            Overlay::FeaturesAtPredicted(features) => features
                .iter()
                .enumerate()
                .filter_map(|(i, f)| {
                    Some(Marker {
                        name: format!("Your {f}"),
                        x: MarkerX::Level(label),
                        y: value(*f)?,
                        series: (features.len() > 1).then_some(i),
                    })
                })
                .collect(),
            Overlay::FeaturePair { x, y } => match (value(*x), value(*y)) {
                (Some(xv), Some(yv)) => vec![Marker {
                    name: "Your Input".to_string(),
                    x: MarkerX::Value(xv),
                    y: yv,
                    series: None,
                }],
                _ => Vec::new(),
            },
            Overlay::FeatureVsPredictedLevel { x } => match value(*x) {
                Some(xv) => vec![Marker {
                    name: "Your Input".to_string(),
                    x: MarkerX::Value(xv),
                    y: label.code() as f64,
                    series: None,
                }],
                None => Vec::new(),
            },
        }
    }
}

const MENTAL_COLUMNS: [&str; 3] = ["anxiety_level", "social_support", "future_career_concerns"];

/// The six comparison charts. Charts whose columns are missing from the dataset are skipped.
pub fn build_comparison_charts(dataset: &ReferenceDataset) -> Vec<ComparisonChart> {
    let mut charts = Vec::with_capacity(6);

    charts.push(ComparisonChart {
        title: "Distribution of Student Stress Levels",
        x_label: "Stress Level".to_string(),
        y_label: "count".to_string(),
        data: ChartData::Histogram {
            counts: level_counts(dataset.stress()),
        },
        overlay: Overlay::PredictedLevel,
    });

    if let Some(series) = box_series(dataset, &MENTAL_COLUMNS) {
        charts.push(ComparisonChart {
            title: "Mental Health & Support Factors Across Stress Levels",
            x_label: "Stress Level".to_string(),
            y_label: "Score".to_string(),
            data: ChartData::Boxes { series },
            overlay: Overlay::FeaturesAtPredicted(MENTAL_COLUMNS.to_vec()),
        });
    }

    let scatters = [
        (
            "Sleep Quality vs Study Load by Stress Level",
            "sleep_quality",
            "study_load",
        ),
        (
            "Study Load vs Academic Performance",
            "study_load",
            "academic_performance",
        ),
        ("Peer Pressure vs Stress Level", "peer_pressure", STRESS_COLUMN),
    ];
    for (title, x, y) in scatters {
        let Some(series) = scatter_series(dataset, x, y) else {
            continue;
        };
        let overlay = if y == STRESS_COLUMN {
            Overlay::FeatureVsPredictedLevel { x }
        } else {
            Overlay::FeaturePair { x, y }
        };
        charts.push(ComparisonChart {
            title,
            x_label: display_name(x),
            y_label: display_name(y),
            data: ChartData::Scatter { series },
            overlay,
        });
    }

    if let Some(series) = box_series(dataset, &["sleep_quality"]) {
        charts.push(ComparisonChart {
            title: "Sleep Quality Across Stress Levels",
            x_label: "Stress Level".to_string(),
            y_label: "Sleep Quality".to_string(),
            data: ChartData::Boxes { series },
            overlay: Overlay::FeaturesAtPredicted(vec!["sleep_quality"]),
        });
    }

    charts
}

fn level_counts(stress: &[StressLevel]) -> Vec<(StressLevel, usize)> {
    StressLevel::ALL
        .iter()
        .map(|&level| (level, stress.iter().filter(|&&s| s == level).count()))
        .collect()
}

fn box_series(dataset: &ReferenceDataset, columns: &[&str]) -> Option<Vec<BoxSeries>> {
    let mut out = Vec::with_capacity(columns.len());
    for &name in columns {
        let Some(values) = dataset.column(name) else {
            tracing::warn!(column = name, "dataset column missing; skipping chart");
            return None;
        };
        let groups = StressLevel::ALL
            .iter()
            .filter_map(|&level| {
                let group: Vec<f64> = values
                    .iter()
                    .zip(dataset.stress())
                    .filter(|(_, s)| **s == level)
                    .map(|(v, _)| *v)
                    .collect();
                BoxGroup::from_values(level, &group)
            })
            .collect();
        out.push(BoxSeries {
            name: name.to_string(),
            groups,
        });
    }
    Some(out)
}

fn scatter_series(dataset: &ReferenceDataset, x: &str, y: &str) -> Option<Vec<ScatterSeries>> {
    let (Some(xs), Some(ys)) = (dataset.column(x), dataset.column(y)) else {
        tracing::warn!(x, y, "dataset columns missing; skipping chart");
        return None;
    };
    let series = StressLevel::ALL
        .iter()
        .filter_map(|&level| {
            let (gx, gy): (Vec<f64>, Vec<f64>) = xs
                .iter()
                .zip(ys)
                .zip(dataset.stress())
                .filter(|(_, s)| **s == level)
                .map(|((x, y), _)| (*x, *y))
                .unzip();
            if gx.is_empty() {
                return None;
            }
            let trend = ols_fit(&gx, &gy);
            let mut points: Vec<(f64, f64)> = gx.into_iter().zip(gy).collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
            points.dedup();
            Some(ScatterSeries {
                level,
                points,
                trend,
            })
        })
        .collect();
    Some(series)
}

#[cfg(test)]
#[path = "../../tests/src_inline/dashboard/charts.rs"]
mod tests;
