use axum::{
    extract::{Path, State},
    routing::{delete, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use wayfarer_core::package::{Package, PackageDraft};
use wayfarer_core::session::Session;

use crate::error::AppError;
use crate::middleware::admin_middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/package", post(create_package))
        .route("/api/admin/package/{id}", delete(delete_package))
        .layer(axum::middleware::from_fn_with_state(state, admin_middleware))
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct CreatePackageRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    destination: String,
    #[serde(default)]
    duration_days: u32,
    #[serde(default)]
    cost: Value,
    #[serde(default)]
    description: String,
}

/// `cost` arrives as either a JSON number or a decimal string; both are
/// handed to the catalog as text for exact parsing.
fn cost_text(cost: &Value) -> String {
    match cost {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn create_package(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<CreatePackageRequest>,
) -> Result<Json<Package>, AppError> {
    let draft = PackageDraft {
        name: req.name,
        destination: req.destination,
        duration_days: req.duration_days,
        cost: cost_text(&req.cost),
        description: req.description,
    };
    Ok(Json(state.catalog.create(&session, draft).await?))
}

async fn delete_package(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    state.catalog.delete(&session, id).await?;
    Ok(Json(json!({ "success": true, "message": "Package deleted" })))
}
