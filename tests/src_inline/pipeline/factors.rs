use std::collections::BTreeMap;

use super::*;
use crate::fixtures;
use crate::pipeline::feature_row::{MissingFieldPolicy, build_row};

fn row(features: &[String], pairs: &[(&str, i64)]) -> FeatureRow {
    let input: BTreeMap<String, i64> = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    build_row(features, &input, MissingFieldPolicy::Default(0)).unwrap()
}

fn names(factors: &[Factor]) -> Vec<&str> {
    factors.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn test_input_scaled_ranking() {
    let features = fixtures::features();
    let weights = fixtures::weights(&fixtures::HIGH_WEIGHTS);
    let r = row(&features, &fixtures::high_stress_input());
    let top = rank_factors(&features, &weights, &r, FactorPolicy::InputScaled);
    assert_eq!(names(&top), vec!["anxiety_level", "depression", "study_load"]);
    assert!((top[0].impact - 2.7).abs() < 1e-12);
}

#[test]
fn test_raw_ranking_ignores_input() {
    let features = fixtures::features();
    let weights = fixtures::weights(&fixtures::HIGH_WEIGHTS);
    let r = row(&features, &[]);
    let top = rank_factors(&features, &weights, &r, FactorPolicy::Raw);
    assert_eq!(names(&top), vec!["anxiety_level", "sleep_quality", "social_support"]);
    assert!(top[1].impact < 0.0);
}

#[test]
fn test_ties_keep_feature_order() {
    let features = fixtures::features();
    let weights = fixtures::weights(&fixtures::HIGH_WEIGHTS);
    let r = row(&features, &[]);
    let top = rank_factors(&features, &weights, &r, FactorPolicy::InputScaled);
    assert_eq!(names(&top), vec!["anxiety_level", "depression", "self_esteem"]);
}

#[test]
fn test_negative_impacts_rank_by_magnitude() {
    let features: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
    let r = row(&features, &[("a", 1), ("b", 1), ("c", 1), ("d", 1)]);
    let top = rank_factors(&features, &[0.1, -2.0, 0.5, 1.0], &r, FactorPolicy::InputScaled);
    assert_eq!(names(&top), vec!["b", "d", "c"]);
}

#[test]
fn test_fewer_features_than_top_n() {
    let features: Vec<String> = vec!["a".to_string(), "b".to_string()];
    let r = row(&features, &[("a", 1), ("b", 3)]);
    let top = rank_factors(&features, &[1.0, 1.0], &r, FactorPolicy::InputScaled);
    assert_eq!(names(&top), vec!["b", "a"]);
    assert!(top.len() <= TOP_FACTORS);
}
