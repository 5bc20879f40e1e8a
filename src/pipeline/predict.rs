use crate::model::linear::LinearClassifier;
use crate::model::schema::StressLevel;
use crate::pipeline::PredictError;
use crate::pipeline::feature_row::FeatureRow;

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: StressLevel,
    /// Aligned with the classifier's class order.
    pub probabilities: Vec<f64>,
    /// Top class probability as a percentage, two decimals.
    pub risk_score: f64,
}

pub fn predict(classifier: &LinearClassifier, row: &FeatureRow) -> Result<Prediction, PredictError> {
    if row.len() != classifier.n_features() {
        return Err(PredictError::Validation(format!(
            "feature row has {} values, model expects {}",
            row.len(),
            classifier.n_features()
        )));
    }

    let x = row.to_f64();
    let probabilities = classifier.predict_proba(&x);
    if probabilities.iter().any(|p| !p.is_finite()) {
        return Err(PredictError::Internal(
            "model produced a non-finite probability".to_string(),
        ));
    }
    let (label, top) = classifier.predict(&x);

    Ok(Prediction {
        label,
        probabilities,
        risk_score: round2(top * 100.0),
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/predict.rs"]
mod tests;
