//! Axum router configuration.
//!
//! Defines the route table and wires the cross-cutting layers: request ids,
//! tracing, the admin token check, and the outer request timeout.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::handlers::{
    create_pull_request, create_team, get_statistics, get_team, get_user_reviews, health,
    merge_pull_request, reassign_reviewer, set_user_active, AppState,
};
use super::middleware::require_admin_token;

/// Routes that require the admin token.
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/users/setIsActive", post(set_user_active))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_admin_token,
        ))
}

/// Routes open to any caller.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(get_statistics))
        .route("/team/add", post(create_team))
        .route("/team/get", get(get_team))
        .route("/users/getReview", get(get_user_reviews))
        .route("/pullRequest/create", post(create_pull_request))
        .route("/pullRequest/merge", post(merge_pull_request))
        .route("/pullRequest/reassign", post(reassign_reviewer))
}

/// Create the complete API router.
///
/// Requests that outlive `state.request_timeout` are answered with
/// `408 Request Timeout` by the timeout layer; handler deadlines are
/// shorter and surface as `504 TIMEOUT`.
pub fn api_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    public_routes()
        .merge(admin_routes(&state))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}
