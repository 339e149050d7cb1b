//! HTTP handlers for the reviewer assignment endpoints.
//!
//! These handlers connect axum routes to application layer command/query handlers.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::adapters::memory::InMemoryStore;
use crate::application::{
    CreatePullRequestCommand, CreatePullRequestHandler, CreateTeamCommand, CreateTeamHandler,
    GetStatisticsHandler, GetTeamHandler, GetTeamQuery, GetUserReviewsHandler,
    GetUserReviewsQuery, MergePullRequestCommand, MergePullRequestHandler,
    ReassignReviewerCommand, ReassignReviewerHandler, SetUserActiveCommand, SetUserActiveHandler,
};
use crate::domain::foundation::{CommandMetadata, ValidationError};
use crate::domain::review::{ReviewError, ReviewerSelector, Validator};
use crate::domain::team::{Team, TeamMember};
use crate::ports::{PullRequestRepository, StatisticsReader, TeamRepository, UserRepository};

use super::dto::{
    CreatePullRequestRequest, CreateTeamRequest, ErrorResponse, HealthResponse,
    MergePullRequestRequest, PullRequestEnvelope, PullRequestResponse,
    PullRequestShortResponse, ReassignResponse, ReassignReviewerRequest, SetUserActiveRequest,
    StatisticsResponse, TeamEnvelope, TeamNameQuery, TeamResponse, UserEnvelope, UserIdQuery,
    UserResponse, UserReviewsResponse,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub team_repository: Arc<dyn TeamRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub pull_request_repository: Arc<dyn PullRequestRepository>,
    pub statistics_reader: Arc<dyn StatisticsReader>,
    pub selector: Arc<ReviewerSelector>,
    /// Expected value of the `X-Admin-Token` header.
    pub admin_token: Arc<str>,
    /// Deadline handed to every application handler.
    pub operation_timeout: Duration,
    /// Outer bound enforced by the router's timeout layer.
    pub request_timeout: Duration,
}

impl AppState {
    /// State where a single in-memory store serves every port.
    pub fn in_memory(
        store: Arc<InMemoryStore>,
        selector: Arc<ReviewerSelector>,
        admin_token: impl Into<Arc<str>>,
        operation_timeout: Duration,
        request_timeout: Duration,
    ) -> Self {
        Self {
            team_repository: store.clone(),
            user_repository: store.clone(),
            pull_request_repository: store.clone(),
            statistics_reader: store,
            selector,
            admin_token: admin_token.into(),
            operation_timeout,
            request_timeout,
        }
    }

    pub fn create_team_handler(&self) -> CreateTeamHandler {
        CreateTeamHandler::new(self.team_repository.clone())
    }

    pub fn get_team_handler(&self) -> GetTeamHandler {
        GetTeamHandler::new(self.team_repository.clone())
    }

    pub fn set_user_active_handler(&self) -> SetUserActiveHandler {
        SetUserActiveHandler::new(self.user_repository.clone())
    }

    pub fn get_user_reviews_handler(&self) -> GetUserReviewsHandler {
        GetUserReviewsHandler::new(self.pull_request_repository.clone())
    }

    pub fn create_pull_request_handler(&self) -> CreatePullRequestHandler {
        CreatePullRequestHandler::new(
            self.pull_request_repository.clone(),
            self.user_repository.clone(),
            self.selector.clone(),
        )
    }

    pub fn merge_pull_request_handler(&self) -> MergePullRequestHandler {
        MergePullRequestHandler::new(self.pull_request_repository.clone())
    }

    pub fn reassign_reviewer_handler(&self) -> ReassignReviewerHandler {
        ReassignReviewerHandler::new(
            self.pull_request_repository.clone(),
            self.user_repository.clone(),
            self.selector.clone(),
        )
    }

    pub fn statistics_handler(&self) -> GetStatisticsHandler {
        GetStatisticsHandler::new(self.statistics_reader.clone())
    }

    /// Builds handler metadata, reusing the request id set by the router.
    fn metadata(&self, headers: &HeaderMap) -> CommandMetadata {
        let metadata = CommandMetadata::new(self.operation_timeout).with_source("http");
        match headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()) {
            Some(request_id) => metadata.with_correlation_id(request_id),
            None => metadata,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /team/get?team_name= - Team with its members
pub async fn get_team(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<TeamNameQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::invalid_request("team_name is required"))?;

    let team = state
        .get_team_handler()
        .handle(
            GetTeamQuery {
                team_name: query.team_name,
            },
            state.metadata(&headers),
        )
        .await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// GET /users/getReview?user_id= - Pull requests the user reviews
pub async fn get_user_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|_| ApiError::invalid_request("user_id is required"))?;
    let user_id = Validator::validate_user_id(&query.user_id, "user_id")?;

    let reviews = state
        .get_user_reviews_handler()
        .handle(GetUserReviewsQuery { user_id }, state.metadata(&headers))
        .await?;

    Ok(Json(UserReviewsResponse {
        user_id: user_id.to_string(),
        pull_requests: reviews.iter().map(PullRequestShortResponse::from).collect(),
    }))
}

/// GET /stats - Assignment statistics
pub async fn get_statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state
        .statistics_handler()
        .handle(state.metadata(&headers))
        .await?;

    Ok(Json(StatisticsResponse::from(&stats)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /team/add - Create a team and upsert its members
pub async fn create_team(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateTeamRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(ApiError::from_json)?;

    let members = request
        .members
        .into_iter()
        .map(|m| {
            Validator::validate_user_id(&m.user_id, "user_id")
                .map(|user_id| TeamMember::new(user_id, m.username, m.is_active))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let team = state
        .create_team_handler()
        .handle(
            CreateTeamCommand {
                team: Team::new(request.team_name, members),
            },
            state.metadata(&headers),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TeamEnvelope {
            team: TeamResponse::from(&team),
        }),
    ))
}

/// POST /users/setIsActive - Toggle a user's reviewer eligibility (admin)
pub async fn set_user_active(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<SetUserActiveRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(ApiError::from_json)?;
    let user_id = Validator::validate_user_id(&request.user_id, "user_id")?;

    let user = state
        .set_user_active_handler()
        .handle(
            SetUserActiveCommand {
                user_id,
                is_active: request.is_active,
            },
            state.metadata(&headers),
        )
        .await?;

    Ok(Json(UserEnvelope {
        user: UserResponse::from(&user),
    }))
}

/// POST /pullRequest/create - Open a pull request and assign reviewers
pub async fn create_pull_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreatePullRequestRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(ApiError::from_json)?;
    let pull_request_id =
        Validator::validate_pull_request_id(&request.pull_request_id, "pull_request_id")?;
    let author_id = Validator::validate_user_id(&request.author_id, "author_id")?;

    let pr = state
        .create_pull_request_handler()
        .handle(
            CreatePullRequestCommand {
                pull_request_id,
                title: request.pull_request_name,
                author_id,
            },
            state.metadata(&headers),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PullRequestEnvelope {
            pr: PullRequestResponse::from(&pr),
        }),
    ))
}

/// POST /pullRequest/merge - Merge a pull request (idempotent)
pub async fn merge_pull_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<MergePullRequestRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(ApiError::from_json)?;
    let pull_request_id =
        Validator::validate_pull_request_id(&request.pull_request_id, "pull_request_id")?;

    let pr = state
        .merge_pull_request_handler()
        .handle(MergePullRequestCommand { pull_request_id }, state.metadata(&headers))
        .await?;

    Ok(Json(PullRequestEnvelope {
        pr: PullRequestResponse::from(&pr),
    }))
}

/// POST /pullRequest/reassign - Replace one reviewer
pub async fn reassign_reviewer(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ReassignReviewerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body.map_err(ApiError::from_json)?;
    let pull_request_id =
        Validator::validate_pull_request_id(&request.pull_request_id, "pull_request_id")?;
    let old_reviewer_id = Validator::validate_user_id(&request.old_user_id, "old_user_id")?;

    let result = state
        .reassign_reviewer_handler()
        .handle(
            ReassignReviewerCommand {
                pull_request_id,
                old_reviewer_id,
            },
            state.metadata(&headers),
        )
        .await?;

    Ok(Json(ReassignResponse {
        pr: PullRequestResponse::from(&result.pull_request),
        replaced_by: result.replaced_by.to_string(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts handler errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Body or query could not be read, or an identifier is malformed.
    InvalidRequest(String),
    Review(ReviewError),
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::InvalidRequest(message.into())
    }

    fn from_json(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }

    /// Status code and wire code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        let err = match self {
            ApiError::InvalidRequest(_) => return (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::Review(err) => err,
        };
        match err {
            ReviewError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ReviewError::TeamExists(_) => (StatusCode::BAD_REQUEST, "TEAM_EXISTS"),
            ReviewError::TeamNotFound(_)
            | ReviewError::UserNotFound(_)
            | ReviewError::PullRequestNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ReviewError::PullRequestExists(_) => (StatusCode::CONFLICT, "PR_EXISTS"),
            ReviewError::PullRequestMerged(_) => (StatusCode::CONFLICT, "PR_MERGED"),
            ReviewError::NotAssigned { .. } => (StatusCode::CONFLICT, "NOT_ASSIGNED"),
            ReviewError::NoCandidate { .. } => (StatusCode::CONFLICT, "NO_CANDIDATE"),
            ReviewError::ReviewerNotFound(_) => (StatusCode::CONFLICT, "REVIEWER_NOT_FOUND"),
            ReviewError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            ReviewError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        ApiError::Review(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match self {
            ApiError::InvalidRequest(message) => message,
            ApiError::Review(ReviewError::Internal(detail)) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                "internal server error".to_string()
            }
            ApiError::Review(err) => err.to_string(),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
