//! Simple API Key Authentication (Bearer Token)

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::routes::ApiError;
use crate::AppState;

/// Authentication middleware
/// Validates Bearer token against the configured API key
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(api_key) = state.api_key.as_deref() else {
        // No API key configured = auth disabled (for development)
        return Ok(next.run(request).await);
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header.map(|h| h.strip_prefix("Bearer ")) {
        Some(Some(token)) if token == api_key => Ok(next.run(request).await),
        Some(Some(_)) => {
            tracing::warn!("Invalid API key attempted");
            Err(ApiError::unauthenticated("invalid API key"))
        }
        Some(None) => {
            tracing::warn!("Invalid Authorization header format");
            Err(ApiError::unauthenticated(
                "Authorization header must be \"Bearer <key>\"",
            ))
        }
        None => {
            tracing::warn!("Missing Authorization header");
            Err(ApiError::unauthenticated("missing Authorization header"))
        }
    }
}
