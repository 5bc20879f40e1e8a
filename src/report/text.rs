use crate::model::schema::display_name;
use crate::pipeline::Assessment;
use crate::report::format_percent;

pub fn render_report_text(assessment: &Assessment) -> String {
    let mut out = String::new();

    out.push_str("Student Stress Prediction\n");
    out.push_str("=========================\n\n");

    out.push_str(&format!("Stress level: {}\n", assessment.stress_level));
    out.push_str(&format!(
        "Confidence:   {}\n\n",
        format_percent(assessment.risk_score)
    ));

    out.push_str("Class probabilities\n");
    for (level, p) in &assessment.probabilities {
        out.push_str(&format!("  {:<7} {}\n", level.as_str(), format_percent(p * 100.0)));
    }
    out.push('\n');

    out.push_str("Top contributing factors\n");
    if assessment.factors.is_empty() {
        out.push_str("  (none)\n");
    }
    for (i, f) in assessment.factors.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} (impact {:+.4})\n",
            i + 1,
            display_name(&f.name),
            f.impact
        ));
    }
    out.push('\n');

    if !assessment.defaulted.is_empty() {
        out.push_str(&format!(
            "Defaulted fields: {}\n\n",
            assessment.defaulted.join(", ")
        ));
    }

    out.push_str("Advice\n");
    out.push_str(&assessment.advice);
    out.push('\n');
    out
}
