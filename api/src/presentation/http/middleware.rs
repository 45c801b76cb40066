//! Bearer-token authentication for protected routes.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::error::ApiError;

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verifies the bearer token and stores its
/// [`AccessClaims`](crate::application::services::tokens::AccessClaims) in
/// the request extensions. Missing, malformed, forged or expired tokens stop
/// the request with 401.
pub async fn require_auth(
    State(ctx): State<AppContext>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        tracing::debug!("missing_or_malformed_authorization_header");
        ApiError::unauthorized("Unauthorized")
    })?;
    let claims = ctx.tokens().verify(token).map_err(|e| {
        tracing::debug!(error = %e, "access_token_rejected");
        ApiError::unauthorized("Unauthorized")
    })?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
