use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use wayfarer_core::package::Package;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/packages", get(list_packages))
        .route("/api/packages/{id}", get(get_package))
}

async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<Package>>, AppError> {
    Ok(Json(state.catalog.list().await?))
}

async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Package>, AppError> {
    Ok(Json(state.catalog.get(id).await?))
}
