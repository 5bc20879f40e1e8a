use super::*;
use crate::fixtures;
use crate::input::dataset::parse_dataset;

fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_slider_defaults() {
    let features = fixtures::features();
    let values = slider_values(&features, &query(&[("anxiety_level", "3")])).unwrap();
    assert_eq!(values.len(), 20);
    assert_eq!(values["anxiety_level"], 3);
    assert_eq!(values["bullying"], SLIDER_DEFAULT);
}

#[test]
fn test_slider_rejections() {
    let features = fixtures::features();
    let err = slider_values(&features, &query(&[("anxiety_level", "4")])).unwrap_err();
    assert_eq!(
        err,
        PredictError::Validation("anxiety_level must be between 0 and 3, got 4".to_string())
    );
    assert!(slider_values(&features, &query(&[("depression", "-1")])).is_err());
    assert!(slider_values(&features, &query(&[("depression", "high")])).is_err());
    assert_eq!(
        slider_values(&features, &query(&[("mood", "1")])).unwrap_err(),
        PredictError::Validation("unknown field: mood".to_string())
    );
}

#[test]
fn test_render_page() {
    let dataset = parse_dataset(fixtures::DATASET_CSV.as_bytes()).unwrap();
    let dashboard = Dashboard::build(&dataset);
    assert_eq!(dashboard.charts.len(), 6);

    let artifacts = fixtures::artifacts();
    let values = slider_values(&artifacts.features, &HashMap::new()).unwrap();
    let html = dashboard
        .render(&artifacts, &PipelineOptions::default(), &values, "/dashboard")
        .unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<h1>AI Student Stress Dashboard</h1>"));
    // all sliders at 1: High -1.0, Low 0.0, Medium 0.5
    assert!(html.contains("<div class=\"value\">Medium</div>"));
    assert!(html.contains("Your predicted stress level is Medium."));
    assert_eq!(html.matches("type=\"range\"").count(), 20);
    assert!(html.contains("action=\"/dashboard\""));
    assert!(!html.contains("getElementById"));
    // gauge, factor bars and six charts
    assert_eq!(html.matches("<svg").count(), 8);
}

#[test]
fn test_render_moves_markers_with_sliders() {
    let dataset = parse_dataset(fixtures::DATASET_CSV.as_bytes()).unwrap();
    let dashboard = Dashboard::build(&dataset);
    let artifacts = fixtures::artifacts();
    let options = PipelineOptions::default();

    let low = slider_values(&artifacts.features, &query(&[("peer_pressure", "0")])).unwrap();
    let high = slider_values(&artifacts.features, &query(&[("peer_pressure", "3")])).unwrap();
    let a = dashboard.render(&artifacts, &options, &low, "/dashboard").unwrap();
    let b = dashboard.render(&artifacts, &options, &high, "/dashboard").unwrap();
    assert_ne!(a, b);
}
