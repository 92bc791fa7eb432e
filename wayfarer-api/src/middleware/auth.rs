use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use wayfarer_core::gate::require_role;
use wayfarer_core::identity::Role;

use crate::error::AppError;
use crate::state::AppState;

/// Pull the opaque token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_owned)
}

// ============================================================================
// Session Middleware (any authenticated identity)
// ============================================================================

pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token from Authorization header
    let token = bearer_token(req.headers());

    // 2. Resolve it to a live session
    let session = state.gate.require_session(token.as_deref()).await?;

    // 3. Inject the session into request extensions
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

// ============================================================================
// Admin Middleware
// ============================================================================

pub async fn admin_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token
    let token = bearer_token(req.headers());

    // 2. Resolve session
    let session = state.gate.require_session(token.as_deref()).await?;

    // 3. Check role is Admin
    require_role(&session, Role::Admin)?;

    // 4. Inject session
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
