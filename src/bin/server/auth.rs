//! Bearer-token guard for the query endpoints
//!
//! The guard is composed explicitly onto the protected routes (see
//! `build_router` in `main.rs`); the public routes (`/`, `/health`,
//! `/metrics`) never pass through it. Verification itself is delegated to
//! the `TokenVerifier` behind the application state.

use super::handlers::AppState;
use super::types::ErrorResponse;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sales_api::error::AuthError;
use sales_api::metrics;
use std::sync::Arc;
use tracing::{debug, warn};

/// Require a verified bearer token before running the inner handler
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(request.headers()) {
        Some(token) => token.to_owned(),
        None => return reject(AuthError::MissingToken),
    };

    match state.verifier.verify(&token).await {
        Ok(claims) => {
            debug!(subject = %claims.subject, "Token verified");
            next.run(request).await
        }
        Err(e) => reject(e),
    }
}

/// Extract the bearer token from the `Authorization` header
///
/// Takes the last whitespace-separated part, so both `Bearer <token>` and a
/// bare token are accepted.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.rsplit(' ').next().unwrap_or("");
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn reject(err: AuthError) -> Response {
    metrics::AUTH_REJECTIONS_TOTAL
        .with_label_values(&[err.reason()])
        .inc();
    warn!(reason = err.reason(), "Request rejected by auth guard");
    (
        StatusCode::FORBIDDEN,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
