//! Admin token middleware.
//!
//! Administrative routes require the `X-Admin-Token` header to match the
//! configured secret:
//!
//! ```ignore
//! let admin = Router::new()
//!     .route("/users/setIsActive", post(set_user_active))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin_token));
//! ```

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::handlers::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Rejects requests whose admin token is missing or wrong with 401.
pub async fn require_admin_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let rejection = match request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|t| !t.is_empty())
    {
        None => Some("X-Admin-Token header required"),
        Some(token) if !constant_time_compare(token.as_bytes(), state.admin_token.as_bytes()) => {
            tracing::warn!(path = %request.uri().path(), "Rejected request with invalid admin token");
            Some("invalid admin token")
        }
        Some(_) => None,
    };

    match rejection {
        Some(message) => unauthorized(message),
        None => next.run(request).await,
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("UNAUTHORIZED", message)),
    )
        .into_response()
}

fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_accepts_equal_tokens() {
        assert!(constant_time_compare(b"admin-secret", b"admin-secret"));
    }

    #[test]
    fn compare_rejects_different_tokens() {
        assert!(!constant_time_compare(b"admin-secret", b"admin-secreT"));
        assert!(!constant_time_compare(b"short", b"longer-token"));
    }
}
