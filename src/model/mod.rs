pub mod linear;
pub mod schema;

use linear::LinearClassifier;
use schema::SchemaMismatch;

/// Everything loaded from the artifact files. Immutable once built; shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub features: Vec<String>,
    pub classifier: LinearClassifier,
    pub schema_mismatch: SchemaMismatch,
}
