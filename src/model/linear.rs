use crate::input::InputError;
use crate::input::model::{ModelArtifact, MultiClass};
use crate::model::schema::StressLevel;

/// A fitted multi-class linear classifier (logistic regression).
///
/// `coef` holds one weight row per class, or a single row for a binary model whose
/// positive class is `classes[1]`.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<StressLevel>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    multi_class: MultiClass,
}

impl LinearClassifier {
    pub fn from_artifact(artifact: ModelArtifact, n_features: usize) -> Result<Self, InputError> {
        let ModelArtifact {
            classes,
            coef,
            intercept,
            multi_class,
        } = artifact;

        if classes.len() < 2 {
            return Err(InputError::InvalidInput(format!(
                "model needs at least 2 classes, found {}",
                classes.len()
            )));
        }
        let mut levels = Vec::with_capacity(classes.len());
        for label in &classes {
            let level = StressLevel::from_label(label).ok_or_else(|| {
                InputError::InvalidInput(format!("unknown class label in model: {label}"))
            })?;
            if levels.contains(&level) {
                return Err(InputError::InvalidInput(format!(
                    "duplicate class label in model: {label}"
                )));
            }
            levels.push(level);
        }

        let binary = coef.len() == 1 && levels.len() == 2;
        if coef.len() != levels.len() && !binary {
            return Err(InputError::InvalidInput(format!(
                "model has {} coefficient rows for {} classes",
                coef.len(),
                levels.len()
            )));
        }
        if intercept.len() != coef.len() {
            return Err(InputError::InvalidInput(format!(
                "model has {} intercepts for {} coefficient rows",
                intercept.len(),
                coef.len()
            )));
        }
        for (i, row) in coef.iter().enumerate() {
            if row.len() != n_features {
                return Err(InputError::InvalidInput(format!(
                    "coefficient row {i} has {} weights but the feature list has {n_features} names",
                    row.len()
                )));
            }
        }
        if coef.iter().flatten().chain(intercept.iter()).any(|w| !w.is_finite()) {
            return Err(InputError::InvalidInput(
                "model contains non-finite weights".to_string(),
            ));
        }

        Ok(Self {
            classes: levels,
            coef,
            intercept,
            multi_class,
        })
    }

    pub fn classes(&self) -> &[StressLevel] {
        &self.classes
    }

    pub fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    /// Raw per-row scores `coef · x + intercept`.
    pub fn decision_function(&self, x: &[f64]) -> Vec<f64> {
        debug_assert_eq!(x.len(), self.n_features());
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }

    /// Class probabilities, aligned with [`classes`](Self::classes).
    pub fn predict_proba(&self, x: &[f64]) -> Vec<f64> {
        let scores = self.decision_function(x);
        if scores.len() == 1 {
            let p = sigmoid(scores[0]);
            return vec![1.0 - p, p];
        }
        match self.multi_class {
            MultiClass::Multinomial => softmax(&scores),
            MultiClass::Ovr => {
                let raw: Vec<f64> = scores.iter().map(|&s| sigmoid(s)).collect();
                let sum: f64 = raw.iter().sum();
                if sum > 0.0 {
                    raw.iter().map(|p| p / sum).collect()
                } else {
                    vec![1.0 / raw.len() as f64; raw.len()]
                }
            }
        }
    }

    /// Predicted class and its probability. Ties go to the class listed first.
    pub fn predict(&self, x: &[f64]) -> (StressLevel, f64) {
        let proba = self.predict_proba(x);
        let mut best = 0usize;
        for (i, &p) in proba.iter().enumerate().skip(1) {
            if p > proba[best] {
                best = i;
            }
        }
        (self.classes[best], proba[best])
    }

    /// Weight row used to explain a prediction: the `High` class row when each class has
    /// its own row, otherwise the single binary row.
    pub fn explanation_weights(&self) -> &[f64] {
        let idx = if self.coef.len() == self.classes.len() {
            self.classes
                .iter()
                .position(|&c| c == StressLevel::High)
                .unwrap_or(0)
        } else {
            0
        };
        &self.coef[idx]
    }
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/linear.rs"]
mod tests;
