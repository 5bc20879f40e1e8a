use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::{InputError, open_maybe_gz};

/// How per-class scores are turned into probabilities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

/// On-disk form of a fitted linear classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub multi_class: MultiClass,
}

pub fn read_model_artifact(path: &Path) -> Result<ModelArtifact, InputError> {
    let reader = open_maybe_gz(path)?;
    serde_json::from_reader(reader)
        .map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))
}
