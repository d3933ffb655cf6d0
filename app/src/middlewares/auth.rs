use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    core::state::AppState,
    utils::{jwt::verify_jwt, response::APIError},
};

/// Rejects requests without a valid bearer token and exposes the token's
/// claims to handlers as an extension.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(tok) => tok,
        None => {
            error!("Auth Failed, Missing or invalid authorization header");
            return APIError::UnAuthorized.into_response();
        }
    };

    let claims = match verify_jwt(token, &state.config.jwt_secret) {
        Ok(c) => c,
        Err(e) => {
            error!("Auth Failed, Invalid token: {}", e);
            return APIError::UnAuthorized.into_response();
        }
    };

    request.extensions_mut().insert(claims);
    next.run(request).await
}
