use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use crate::input::{InputError, open_maybe_gz};

/// Reads the ordered feature-name list. Accepts a JSON array of strings, or plain text with
/// one name per line (blank lines and `#` comments skipped).
pub fn read_feature_list(path: &Path) -> Result<Vec<String>, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_feature_list(&content)
        .map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))
}

pub fn parse_feature_list(content: &str) -> Result<Vec<String>, String> {
    let trimmed = content.trim_start();
    let names: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str::<Vec<String>>(trimmed).map_err(|e| e.to_string())?
    } else {
        content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect()
    };

    if names.is_empty() {
        return Err("feature list is empty".to_string());
    }

    let mut seen = BTreeSet::new();
    for name in &names {
        let name = name.trim();
        if name.is_empty() {
            return Err("feature list contains an empty name".to_string());
        }
        if !seen.insert(name) {
            return Err(format!("duplicate feature name: {name}"));
        }
    }

    Ok(names.into_iter().map(|n| n.trim().to_string()).collect())
}
