use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

pub fn hash_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Guards routes that change `project_track`.
///
/// Without a configured digest every caller may write.
pub async fn require_write_key(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.write_key_sha256.as_deref() else {
        return Ok(next.run(request).await);
    };

    let api_key_header = headers
        .get(API_KEY_HEADER)
        .ok_or(AppError::Unauthorized("Missing API Key".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid API Key format".to_string()))?;

    if hash_key(api_key_header) != expected {
        tracing::warn!(path = %request.uri().path(), "rejected write with invalid API key");
        return Err(AppError::Unauthorized("Invalid API Key".to_string()));
    }

    Ok(next.run(request).await)
}
