//! API route handlers

use std::collections::HashMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use serde_json::Value;

use crate::model::schema::API_FIELDS;
use crate::pipeline::assess;
use crate::pipeline::feature_row::{MissingFieldPolicy, build_row, integer_fields};
use crate::report::PredictionReport;
use crate::server::AppState;
use crate::server::error::ApiError;

pub const DASHBOARD_PATH: &str = "/dashboard";

pub async fn home() -> Json<Value> {
    Json(serde_json::json!({ "message": "AI Stress Predictor API is running" }))
}

/// Liveness check - is the server running?
pub async fn liveness() -> Json<Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check - artifacts are loaded by the time the listener binds, so this reports
/// what was loaded, including any schema mismatch.
pub async fn readiness(State(state): State<AppState>) -> Json<Value> {
    let artifacts = &state.artifacts;
    Json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "features": artifacts.features,
        "classes": artifacts.classifier.classes(),
        "dashboard": state.dashboard.is_some(),
        "schema_mismatch": artifacts.schema_mismatch,
    }))
}

pub async fn predict_stress(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictionReport>, ApiError> {
    let Json(body) = body?;
    let Value::Object(fields) = body else {
        return Err(ApiError::Validation(
            "request body must be a JSON object".to_string(),
        ));
    };

    let input = integer_fields(&state.artifacts.features, &API_FIELDS, &fields)?;
    let policy = if state.options.strict_fields {
        MissingFieldPolicy::Reject
    } else {
        MissingFieldPolicy::Default(0)
    };
    let row = build_row(&state.artifacts.features, &input, policy)?;
    let assessment = assess(&state.artifacts, &row, state.options.factor_policy)?;

    Ok(Json(PredictionReport::from(&assessment)))
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let Some(dashboard) = &state.dashboard else {
        return Err(ApiError::Unavailable(
            "dashboard disabled: reference dataset not loaded".to_string(),
        ));
    };
    let values = crate::dashboard::slider_values(&state.artifacts.features, &query)?;
    let page = dashboard.render(&state.artifacts, &state.options, &values, DASHBOARD_PATH)?;
    Ok(Html(page))
}

#[cfg(test)]
#[path = "../../tests/src_inline/server/routes.rs"]
mod tests;
