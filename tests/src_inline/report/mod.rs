use std::collections::BTreeMap;

use super::json::render_report_json;
use super::text::render_report_text;
use super::*;
use crate::fixtures;
use crate::pipeline::assess;
use crate::pipeline::factors::FactorPolicy;
use crate::pipeline::feature_row::{MissingFieldPolicy, build_row};

fn assessment(pairs: &[(&str, i64)]) -> Assessment {
    let artifacts = fixtures::artifacts();
    let input: BTreeMap<String, i64> = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    let row = build_row(&artifacts.features, &input, MissingFieldPolicy::Default(0)).unwrap();
    assess(&artifacts, &row, FactorPolicy::InputScaled).unwrap()
}

#[test]
fn test_report_from_assessment() {
    let a = assessment(&fixtures::high_stress_input());
    let report = PredictionReport::from(&a);
    assert_eq!(report.stress_level, "High");
    assert_eq!(report.risk_score, 99.63);
    assert_eq!(report.top_factors, vec!["anxiety_level", "depression", "study_load"]);
    assert_eq!(report.advice, a.advice);
}

#[test]
fn test_json_report_keys() {
    let a = assessment(&[]);
    let json = render_report_json(&a).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["advice", "risk_score", "stress_level", "top_factors"]);
    assert_eq!(value["stress_level"], "Low");
    assert_eq!(value["risk_score"], 60.37);
}

#[test]
fn test_text_report() {
    let a = assessment(&fixtures::high_stress_input());
    let text = render_report_text(&a);
    assert!(text.contains("Stress level: High\n"));
    assert!(text.contains("Confidence:   99.63%\n"));
    assert!(text.contains("  1. Anxiety Level (impact +2.7000)\n"));
    assert!(text.contains("Defaulted fields: "));
    assert!(text.ends_with(&format!("{}\n", a.advice)));
}

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(60.371), "60.37%");
    assert_eq!(format_percent(100.0), "100.00%");
}
