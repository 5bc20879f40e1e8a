use super::*;
use serde_json::json;

fn features() -> Vec<String> {
    vec!["anxiety_level".to_string(), "depression".to_string()]
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("not an object"),
    }
}

#[test]
fn test_cli_input_set_overrides_file() {
    let fields = object(json!({"anxiety_level": 1, "depression": 2}));
    let set = vec![("anxiety_level".to_string(), 3)];
    let input = cli_input(&features(), fields, &set).unwrap();
    assert_eq!(input["anxiety_level"], 3);
    assert_eq!(input["depression"], 2);
}

#[test]
fn test_cli_input_drops_declared_unused_set_field() {
    let set = vec![
        ("anxiety_level".to_string(), 2),
        ("bullying".to_string(), 3),
    ];
    let input = cli_input(&features(), Map::new(), &set).unwrap();
    assert_eq!(input.len(), 1);
    assert!(!input.contains_key("bullying"));

    // same filter as a file field
    let fields = object(json!({"bullying": 3}));
    assert!(cli_input(&features(), fields, &[]).unwrap().is_empty());
}

#[test]
fn test_cli_input_rejects_undeclared_set_field() {
    let set = vec![("mood".to_string(), 1)];
    assert_eq!(
        cli_input(&features(), Map::new(), &set).unwrap_err(),
        PredictError::Validation("unknown field: mood".to_string())
    );
}

#[test]
fn test_predict_error_message_is_transparent() {
    let err = RunError::from(PredictError::Validation("unknown field: mood".to_string()));
    assert_eq!(err.to_string(), "unknown field: mood");
}
