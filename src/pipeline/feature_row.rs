use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::pipeline::PredictError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingFieldPolicy {
    /// Fill absent features with this value and record their names on the row.
    Default(i64),
    Reject,
}

/// One input record with values in the model's feature order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: Vec<i64>,
    defaulted: Vec<String>,
}

impl FeatureRow {
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn to_f64(&self) -> Vec<f64> {
        self.values.iter().map(|&v| v as f64).collect()
    }

    /// Feature names that were absent from the input and filled by the policy.
    pub fn defaulted(&self) -> &[String] {
        &self.defaulted
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Orders `input` by `features`. Keys the model does not know are rejected.
pub fn build_row(
    features: &[String],
    input: &BTreeMap<String, i64>,
    policy: MissingFieldPolicy,
) -> Result<FeatureRow, PredictError> {
    if let Some(unknown) = input.keys().find(|k| !features.contains(k)) {
        return Err(PredictError::Validation(format!("unknown field: {unknown}")));
    }

    let mut values = Vec::with_capacity(features.len());
    let mut defaulted = Vec::new();
    for name in features {
        match (input.get(name), policy) {
            (Some(&v), _) => values.push(v),
            (None, MissingFieldPolicy::Default(fill)) => {
                values.push(fill);
                defaulted.push(name.clone());
            }
            (None, MissingFieldPolicy::Reject) => {
                return Err(PredictError::Validation(format!("missing field: {name}")));
            }
        }
    }

    if !defaulted.is_empty() {
        tracing::warn!(fields = ?defaulted, "missing fields filled with default value");
    }

    Ok(FeatureRow { values, defaulted })
}

/// Integer values for the model's features from a JSON object. Names in `declared` that the
/// model does not use are dropped; any other unknown name is rejected.
pub fn integer_fields(
    features: &[String],
    declared: &[&str],
    fields: &Map<String, Value>,
) -> Result<BTreeMap<String, i64>, PredictError> {
    let mut out = BTreeMap::new();
    for (name, value) in fields {
        let known = features.contains(name);
        if !known && !declared.contains(&name.as_str()) {
            return Err(PredictError::Validation(format!("unknown field: {name}")));
        }
        let Some(v) = as_integer(value) else {
            return Err(PredictError::Validation(format!(
                "{name} must be an integer, got {value}"
            )));
        };
        if known {
            out.insert(name.clone(), v);
        } else {
            tracing::debug!(field = %name, "declared field not used by the model; ignored");
        }
    }
    Ok(out)
}

fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/feature_row.rs"]
mod tests;
