use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Rejects the request unless it carries a valid bearer token.
///
/// Claims are checked and then dropped; handlers behind this layer do not
/// learn who the caller is.
pub async fn require_bearer(
    State(auth_service): State<Arc<dyn AuthServicePort>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let claims = auth_service.authorize(token)?;
    tracing::debug!(subject = %claims.sub, "Bearer token accepted");

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, AuthError> {
    let header = req.headers().get(AUTHORIZATION).ok_or_else(|| {
        tracing::warn!("Missing Authorization header");
        AuthError::BearerMissing
    })?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            tracing::warn!("Authorization header does not use the Bearer scheme");
            AuthError::BearerMissing
        })
}
