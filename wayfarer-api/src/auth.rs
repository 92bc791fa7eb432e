use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use axum_extra::headers::{authorization::Bearer, Authorization};
use axum_extra::TypedHeader;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wayfarer_core::credentials::Registration;
use wayfarer_core::identity::IdentityView;
use wayfarer_core::Error as CoreError;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .route("/api/me", get(me))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    #[serde(default)]
    full_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    contact_no: String,
    #[serde(default)]
    address: String,
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    let identity = state
        .credentials
        .register(Registration {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            contact_no: req.contact_no,
            address: req.address,
        })
        .await?;

    Ok(Json(json!({ "success": true, "id": identity.id })))
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    token: String,
    user: IdentityView,
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state.authority.authenticate(&req.email, &req.password).await?;
    let user = state
        .credentials
        .profile(session.identity_id)
        .await?
        .ok_or_else(|| {
            CoreError::Internal(format!("identity {} missing after login", session.identity_id))
        })?;

    Ok(Json(LoginResponse {
        success: true,
        token: session.token,
        user,
    }))
}

async fn logout(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<Value>, AppError> {
    if let Some(TypedHeader(Authorization(bearer))) = bearer {
        state.authority.revoke(bearer.token()).await?;
    }
    Ok(Json(json!({ "success": true })))
}

/// Session identity and role, or a null user when the token is absent,
/// unknown or expired.
async fn me(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<Value>, AppError> {
    let user = match bearer {
        Some(TypedHeader(Authorization(bearer))) => {
            match state.authority.resolve(bearer.token()).await? {
                Some(session) => state.credentials.profile(session.identity_id).await?,
                None => None,
            }
        }
        None => None,
    };
    Ok(Json(json!({ "user": user })))
}
