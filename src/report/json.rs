use crate::pipeline::Assessment;
use crate::report::PredictionReport;

pub fn render_report_json(assessment: &Assessment) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PredictionReport::from(assessment))
}
