use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use wayfarer_core::booking::{Booking, BookingView};
use wayfarer_core::session::Session;

use crate::error::AppError;
use crate::middleware::session_middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/book", post(book))
        .route("/api/bookings", get(list_bookings))
        .layer(axum::middleware::from_fn_with_state(state, session_middleware))
}

/// Deliberately carries no cost field; the total is derived server-side
/// from the package's unit cost.
#[derive(Debug, Deserialize)]
struct BookRequest {
    package_id: i64,
    party_size: u32,
}

async fn book(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(req): Json<BookRequest>,
) -> Result<Json<Booking>, AppError> {
    let booking = state
        .ledger
        .book(&session, req.package_id, req.party_size)
        .await?;
    Ok(Json(booking))
}

async fn list_bookings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    Ok(Json(state.ledger.list(&session).await?))
}
