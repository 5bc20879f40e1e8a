use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

pub mod dataset;
pub mod features;
pub mod model;

use crate::model::Artifacts;
use crate::model::linear::LinearClassifier;
use crate::model::schema::{API_FIELDS, SchemaMismatch};
use features::read_feature_list;
use model::read_model_artifact;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub features: PathBuf,
}

/// Opens `path` for buffered reading, decompressing on the fly when it ends in `.gz`.
pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InputError::MissingInput(path.display().to_string()),
        _ => InputError::Io(e),
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Loads the classifier and its ordered feature list. Any failure here is fatal for the caller.
pub fn load_artifacts(paths: &ArtifactPaths) -> Result<Artifacts, InputError> {
    let features = read_feature_list(&paths.features)?;
    let artifact = read_model_artifact(&paths.model)?;
    let classifier = LinearClassifier::from_artifact(artifact, features.len())?;

    tracing::info!(
        model = %paths.model.display(),
        features = %paths.features.display(),
        n_features = features.len(),
        classes = ?classifier.classes(),
        "loaded model artifacts"
    );

    let schema_mismatch = SchemaMismatch::compare(&API_FIELDS, &features);
    if !schema_mismatch.is_empty() {
        tracing::warn!(
            missing_from_model = ?schema_mismatch.missing_from_model,
            missing_from_api = ?schema_mismatch.missing_from_api,
            "schema mismatch between declared API fields and model features"
        );
    }

    Ok(Artifacts {
        features,
        classifier,
        schema_mismatch,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
