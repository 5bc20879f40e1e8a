use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

use super::features::parse_feature_list;
use super::*;
use crate::fixtures;

fn write_artifacts(dir: &Path, model: &str, features: &str) -> ArtifactPaths {
    let model_path = dir.join("stress_model.json");
    let features_path = dir.join("features.json");
    std::fs::write(&model_path, model).unwrap();
    std::fs::write(&features_path, features).unwrap();
    ArtifactPaths {
        model: model_path,
        features: features_path,
    }
}

fn fixture_model_json() -> String {
    serde_json::to_string(&fixtures::model_artifact()).unwrap()
}

fn fixture_features_json() -> String {
    serde_json::to_string(&fixtures::features()).unwrap()
}

#[test]
fn test_load_artifacts_roundtrip_from_disk() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = write_artifacts(tmp.path(), &fixture_model_json(), &fixture_features_json());
    let artifacts = load_artifacts(&paths).unwrap();
    assert_eq!(artifacts.features.len(), 20);
    assert_eq!(artifacts.classifier.n_features(), 20);
    assert!(artifacts.schema_mismatch.is_empty());
}

#[test]
fn test_missing_model_file_is_missing_input() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths {
        model: tmp.path().join("nope.json"),
        features: tmp.path().join("features.json"),
    };
    std::fs::write(&paths.features, fixture_features_json()).unwrap();
    let err = load_artifacts(&paths).unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)), "{err}");
}

#[test]
fn test_width_mismatch_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = write_artifacts(
        tmp.path(),
        &fixture_model_json(),
        r#"["anxiety_level","sleep_quality"]"#,
    );
    let err = load_artifacts(&paths).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)), "{err}");
}

#[test]
fn test_malformed_model_is_parse_error() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = write_artifacts(tmp.path(), "{not json", &fixture_features_json());
    let err = load_artifacts(&paths).unwrap_err();
    assert!(matches!(err, InputError::Parse(_)), "{err}");
}

#[test]
fn test_schema_mismatch_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let model = r#"{"classes":["Low","High"],"coef":[[0.5,-0.5]],"intercept":[0.0]}"#;
    let paths = write_artifacts(tmp.path(), model, r#"["anxiety_level","caffeine"]"#);
    let artifacts = load_artifacts(&paths).unwrap();
    assert_eq!(artifacts.schema_mismatch.missing_from_api, vec!["caffeine"]);
    assert_eq!(artifacts.schema_mismatch.missing_from_model.len(), 19);
}

#[test]
fn test_gzip_features_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("features.txt.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(b"anxiety_level\nsleep_quality\n").unwrap();
    std::fs::write(&path, enc.finish().unwrap()).unwrap();

    let names = features::read_feature_list(&path).unwrap();
    assert_eq!(names, vec!["anxiety_level", "sleep_quality"]);
}

#[test]
fn test_parse_feature_list_text_and_json() {
    let text = "# exported features\nanxiety_level\n\n sleep_quality \n";
    assert_eq!(
        parse_feature_list(text).unwrap(),
        vec!["anxiety_level", "sleep_quality"]
    );
    assert_eq!(
        parse_feature_list(r#"["a", "b"]"#).unwrap(),
        vec!["a", "b"]
    );
}

#[test]
fn test_parse_feature_list_rejects_duplicates_and_empty() {
    assert!(parse_feature_list("a\nb\na\n").unwrap_err().contains("duplicate"));
    assert!(parse_feature_list("").is_err());
    assert!(parse_feature_list(r#"["a", " "]"#).is_err());
}
