use crate::model::schema::StressLevel;

/// Canned suggestion for one factor, chosen by keyword.
pub fn advice_for(factor: &str) -> String {
    let name = factor.replace('_', " ");
    if factor.contains("sleep") {
        format!("Improve your {name} to reduce stress.")
    } else if factor.contains("study") || factor.contains("academic") {
        format!("Manage your {name} for better balance.")
    } else if factor.contains("anxiety") || factor.contains("depression") {
        format!("Practice mindfulness to lower {name}.")
    } else if factor.contains("social_support") || factor.contains("peer") {
        format!("Engage with supportive friends to improve {name}.")
    } else {
        format!("Work on {name} to reduce stress.")
    }
}

pub fn compose_advice(label: StressLevel, factors: &[String]) -> String {
    let listed = if factors.is_empty() {
        "not available".to_string()
    } else {
        factors.join(", ")
    };
    let mut out = format!(
        "Your predicted stress level is {label}. \
         The top factors contributing to your stress are {listed}. "
    );
    let parts: Vec<String> = factors.iter().map(|f| advice_for(f)).collect();
    out.push_str(&parts.join(" "));
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/advice.rs"]
mod tests;
