use std::collections::BTreeMap;
use std::path::Path;

use crate::input::{InputError, open_maybe_gz};
use crate::model::schema::StressLevel;

pub const STRESS_COLUMN: &str = "stress_level";

/// Historical student records, stored column-wise. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataset {
    columns: BTreeMap<String, Vec<f64>>,
    stress: Vec<StressLevel>,
}

impl ReferenceDataset {
    pub fn len(&self) -> usize {
        self.stress.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stress.is_empty()
    }

    /// Numeric column by name; `stress_level` yields the label codes.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn stress(&self) -> &[StressLevel] {
        &self.stress
    }
}

pub fn load_dataset(path: &Path) -> Result<ReferenceDataset, InputError> {
    let reader = open_maybe_gz(path)?;
    let dataset = parse_dataset(reader)
        .map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        columns = dataset.columns.len(),
        "loaded reference dataset"
    );
    Ok(dataset)
}

pub fn parse_dataset<R: std::io::Read>(reader: R) -> Result<ReferenceDataset, String> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = reader.headers().map_err(|e| e.to_string())?.clone();

    let stress_idx = headers
        .iter()
        .position(|h| h == STRESS_COLUMN)
        .ok_or_else(|| format!("missing column: {STRESS_COLUMN}"))?;

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    let mut stress = Vec::new();
    let mut parsed = vec![0.0f64; headers.len()];

    'records: for (line_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| e.to_string())?;
        // header is line 1
        let line_no = line_no + 2;
        if record.len() != headers.len() {
            tracing::warn!(line = line_no, "dataset row has wrong column count; skipping");
            continue;
        }
        for (idx, field) in record.iter().enumerate() {
            match field.parse::<f64>() {
                Ok(v) if v.is_finite() => parsed[idx] = v,
                _ => {
                    tracing::warn!(
                        line = line_no,
                        column = &headers[idx],
                        value = field,
                        "non-numeric dataset cell; skipping row"
                    );
                    continue 'records;
                }
            }
        }
        let code = parsed[stress_idx];
        let Some(level) = (code.fract() == 0.0)
            .then(|| StressLevel::from_code(code as i64))
            .flatten()
        else {
            tracing::warn!(line = line_no, value = code, "unknown stress_level code; skipping row");
            continue;
        };
        stress.push(level);
        for (col, &v) in columns.iter_mut().zip(parsed.iter()) {
            col.push(v);
        }
    }

    if stress.is_empty() {
        return Err("dataset has no usable rows".to_string());
    }

    Ok(ReferenceDataset {
        columns: headers
            .iter()
            .map(str::to_string)
            .zip(columns)
            .collect(),
        stress,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/dataset.rs"]
mod tests;
