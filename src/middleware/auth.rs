use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::context::AppContext;
use crate::error::ApiError;

/// Bearer-token gate for the protected routes: a missing Authorization
/// header is 403, anything present that fails verification is 400. The
/// decoded payload is not forwarded to downstream handlers.
pub async fn require_auth(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::forbidden("No token provided!"))?;

    let token = extract_token(header).ok_or_else(|| ApiError::bad_request("Invalid token!"))?;

    auth::verify(token, &ctx.config.token_secret).map_err(|err| {
        tracing::debug!("rejected bearer token: {}", err);
        ApiError::bad_request("Invalid token!")
    })?;

    Ok(next.run(request).await)
}

/// Accepts `Bearer <token>` or a bare token value; whatever remains still
/// has to pass signature verification.
fn extract_token(header: &axum::http::HeaderValue) -> Option<&str> {
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}
