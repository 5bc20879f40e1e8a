use crate::input::model::{ModelArtifact, MultiClass};
use crate::model::Artifacts;
use crate::model::linear::LinearClassifier;
use crate::model::schema::{API_FIELDS, SchemaMismatch};

pub fn features() -> Vec<String> {
    API_FIELDS.iter().map(|s| s.to_string()).collect()
}

/// Weight row aligned with `API_FIELDS`; unnamed features get 0.
pub fn weights(pairs: &[(&str, f64)]) -> Vec<f64> {
    API_FIELDS
        .iter()
        .map(|f| {
            pairs
                .iter()
                .find(|(name, _)| name == f)
                .map_or(0.0, |(_, w)| *w)
        })
        .collect()
}

pub const HIGH_WEIGHTS: [(&str, f64); 8] = [
    ("anxiety_level", 0.9),
    ("depression", 0.6),
    ("study_load", 0.5),
    ("peer_pressure", 0.4),
    ("bullying", 0.3),
    ("sleep_quality", -0.8),
    ("social_support", -0.7),
    ("self_esteem", -0.2),
];

/// Three-class multinomial model: all-zero input predicts Low (60.37%), a maxed-out
/// anxiety/depression/study/peer/bullying profile predicts High (99.63%).
pub fn model_artifact() -> ModelArtifact {
    let high = weights(&HIGH_WEIGHTS);
    let low: Vec<f64> = high.iter().map(|w| -w).collect();
    let medium = vec![0.0; API_FIELDS.len()];
    ModelArtifact {
        classes: vec!["High".to_string(), "Low".to_string(), "Medium".to_string()],
        coef: vec![high, low, medium],
        intercept: vec![-2.0, 1.0, 0.5],
        multi_class: MultiClass::Multinomial,
    }
}

pub fn artifacts() -> Artifacts {
    let features = features();
    let classifier = LinearClassifier::from_artifact(model_artifact(), features.len()).unwrap();
    Artifacts {
        features,
        classifier,
        schema_mismatch: SchemaMismatch::default(),
    }
}

pub fn high_stress_input() -> Vec<(&'static str, i64)> {
    vec![
        ("anxiety_level", 3),
        ("depression", 3),
        ("study_load", 3),
        ("peer_pressure", 3),
        ("bullying", 3),
        ("sleep_quality", 0),
        ("social_support", 0),
        ("self_esteem", 0),
    ]
}

pub const DATASET_CSV: &str = "\
anxiety_level,self_esteem,sleep_quality,study_load,academic_performance,peer_pressure,social_support,future_career_concerns,stress_level
2,20,4,1,4,1,3,1,0
4,25,5,2,3,2,3,1,0
6,22,4,2,4,1,2,2,0
10,15,3,3,3,2,2,2,1
12,14,2,3,3,3,2,3,1
11,16,3,2,2,3,1,3,1
18,8,1,4,2,4,1,4,2
20,6,1,5,1,5,0,5,2
19,7,2,4,1,5,0,5,2
21,5,1,5,1,4,1,4,2
";
