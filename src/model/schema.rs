use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields the HTTP API declares for a student record.
pub const API_FIELDS: [&str; 20] = [
    "anxiety_level",
    "depression",
    "self_esteem",
    "mental_health_history",
    "headache",
    "blood_pressure",
    "sleep_quality",
    "breathing_problem",
    "noise_level",
    "living_conditions",
    "safety",
    "basic_needs",
    "academic_performance",
    "study_load",
    "teacher_student_relationship",
    "future_career_concerns",
    "social_support",
    "peer_pressure",
    "extracurricular_activities",
    "bullying",
];

pub const SLIDER_MIN: i64 = 0;
pub const SLIDER_MAX: i64 = 3;
pub const SLIDER_DEFAULT: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    pub const ALL: [StressLevel; 3] = [StressLevel::Low, StressLevel::Medium, StressLevel::High];

    /// Accepts the label spellings found in model artifacts (`"Low"`, `"medium"`, `"2"`).
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if let Ok(code) = label.parse::<i64>() {
            return Self::from_code(code);
        }
        match label.to_ascii_lowercase().as_str() {
            "low" => Some(StressLevel::Low),
            "medium" => Some(StressLevel::Medium),
            "high" => Some(StressLevel::High),
            _ => None,
        }
    }

    /// Dataset encoding: 0 = Low, 1 = Medium, 2 = High.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(StressLevel::Low),
            1 => Some(StressLevel::Medium),
            2 => Some(StressLevel::High),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            StressLevel::Low => 0,
            StressLevel::Medium => 1,
            StressLevel::High => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Medium => "Medium",
            StressLevel::High => "High",
        }
    }

    pub fn dataset_label(self) -> &'static str {
        match self {
            StressLevel::Low => "Low Stress",
            StressLevel::Medium => "Medium Stress",
            StressLevel::High => "High Stress",
        }
    }
}

impl fmt::Display for StressLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names present on only one side of the declared API schema / model feature list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaMismatch {
    pub missing_from_model: Vec<String>,
    pub missing_from_api: Vec<String>,
}

impl SchemaMismatch {
    pub fn compare(declared: &[&str], model_features: &[String]) -> Self {
        let missing_from_model = declared
            .iter()
            .filter(|d| !model_features.iter().any(|f| f == *d))
            .map(|d| d.to_string())
            .collect();
        let missing_from_api = model_features
            .iter()
            .filter(|f| !declared.contains(&f.as_str()))
            .cloned()
            .collect();
        Self {
            missing_from_model,
            missing_from_api,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.missing_from_model.is_empty() && self.missing_from_api.is_empty()
    }
}

/// `"future_career_concerns"` -> `"Future Career Concerns"`.
pub fn display_name(feature: &str) -> String {
    feature
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/schema.rs"]
mod tests;
