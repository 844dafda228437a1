use base64::{engine::general_purpose, Engine as _};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
};

/// Reads the claims out of a bearer token without verifying it.
///
/// Only the payload segment is read. The header and signature are ignored, so an
/// unknown or missing `alg` does not matter. The API enforces authorization on
/// every request; expiry is left to the access evaluator.
pub fn decode_claims(token: &str) -> AppResult<Claims> {
    let token = token.trim();
    if token.is_empty() {
        return Err(AppError::TokenMalformed("token is empty".to_string()));
    }

    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AppError::TokenMalformed("missing payload segment".to_string()))?;

    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AppError::TokenMalformed(format!("payload is not base64url: {}", e)))?;

    serde_json::from_slice::<Claims>(&bytes)
        .map_err(|e| AppError::TokenMalformed(format!("payload is not a claims object: {}", e)))
}
