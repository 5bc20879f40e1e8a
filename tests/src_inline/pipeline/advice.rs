use super::*;

#[test]
fn test_keyword_table() {
    assert_eq!(advice_for("sleep_quality"), "Improve your sleep quality to reduce stress.");
    assert_eq!(advice_for("study_load"), "Manage your study load for better balance.");
    assert_eq!(
        advice_for("academic_performance"),
        "Manage your academic performance for better balance."
    );
    assert_eq!(advice_for("anxiety_level"), "Practice mindfulness to lower anxiety level.");
    assert_eq!(advice_for("depression"), "Practice mindfulness to lower depression.");
    assert_eq!(
        advice_for("social_support"),
        "Engage with supportive friends to improve social support."
    );
    assert_eq!(
        advice_for("peer_pressure"),
        "Engage with supportive friends to improve peer pressure."
    );
    assert_eq!(advice_for("noise_level"), "Work on noise level to reduce stress.");
}

#[test]
fn test_compose_advice() {
    let text = compose_advice(
        StressLevel::High,
        &["anxiety_level".to_string(), "sleep_quality".to_string()],
    );
    assert_eq!(
        text,
        "Your predicted stress level is High. \
         The top factors contributing to your stress are anxiety_level, sleep_quality. \
         Practice mindfulness to lower anxiety level. \
         Improve your sleep quality to reduce stress."
    );
}

#[test]
fn test_compose_advice_without_factors() {
    let text = compose_advice(StressLevel::Low, &[]);
    assert_eq!(
        text,
        "Your predicted stress level is Low. The top factors contributing to your stress are not available. "
    );
}
