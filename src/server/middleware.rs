use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

use super::AppState;

/// Header carrying the shared API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Require `X-API-Key` to equal `api.key` when one is configured.
///
/// Without a configured key every request passes.
pub async fn api_key_auth(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.settings.api.key.as_deref() else {
        return Ok(next.run(req).await);
    };

    let authorized = match req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        Some(presented) => presented == expected,
        None => {
            tracing::warn!(path = %req.uri().path(), "Missing API key header");
            return Err(AppError::Unauthorized(format!(
                "Missing {} header",
                API_KEY_HEADER
            )));
        }
    };

    if !authorized {
        tracing::warn!(path = %req.uri().path(), "Invalid API key provided");
        return Err(AppError::Unauthorized("Invalid API key".to_string()));
    }

    Ok(next.run(req).await)
}
