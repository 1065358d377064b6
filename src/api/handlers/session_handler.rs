//! Workout session handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::domain::{NewWorkoutSession, UpdateWorkoutSession, WorkoutSessionResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::SessionFilter;
use crate::types::{Created, NoContent, Paginated, PaginationParams};

/// Session list query parameters
#[derive(Debug, Deserialize)]
pub struct ListSessionsQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    /// Earliest session date to include
    pub from: Option<NaiveDate>,
    /// Latest session date to include
    pub to: Option<NaiveDate>,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Create workout session routes
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route(
            "/:session_id",
            get(get_session).put(update_session).delete(delete_session),
        )
}

/// Create a workout session
#[utoipa::path(
    post,
    path = "/sessions",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    request_body = NewWorkoutSession,
    responses(
        (status = 201, description = "Session created", body = WorkoutSessionResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Session already exists for this date")
    )
)]
pub async fn create_session(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<NewWorkoutSession>,
) -> AppResult<Created<WorkoutSessionResponse>> {
    let session = state
        .workout_service
        .create_session(current_user.id, payload)
        .await?;

    Ok(Created(WorkoutSessionResponse::from(session)))
}

/// List the authenticated user's sessions
#[utoipa::path(
    get,
    path = "/sessions",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number (1-indexed)"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
        ("from" = Option<NaiveDate>, Query, description = "Earliest date"),
        ("to" = Option<NaiveDate>, Query, description = "Latest date")
    ),
    responses(
        (status = 200, description = "Paginated sessions, newest first"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_sessions(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(query): Query<ListSessionsQuery>,
) -> AppResult<Json<Paginated<WorkoutSessionResponse>>> {
    let params = PaginationParams {
        page: query.page,
        per_page: query.per_page,
    };
    let filter = SessionFilter {
        from: query.from,
        to: query.to,
    };

    let (sessions, total) = state
        .workout_service
        .list_sessions(current_user.id, filter, &params)
        .await?;

    let data = sessions
        .into_iter()
        .map(WorkoutSessionResponse::from)
        .collect();
    Ok(Json(Paginated::new(
        data,
        params.page,
        params.limit(),
        total,
    )))
}

/// Get one session by id
#[utoipa::path(
    get,
    path = "/sessions/{session_id}",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session", body = WorkoutSessionResponse),
        (status = 404, description = "Session not found")
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<WorkoutSessionResponse>> {
    let session = state
        .workout_service
        .get_session(current_user.id, session_id)
        .await?;

    Ok(Json(WorkoutSessionResponse::from(session)))
}

/// Update a session
#[utoipa::path(
    put,
    path = "/sessions/{session_id}",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("session_id" = Uuid, Path, description = "Session id")),
    request_body = UpdateWorkoutSession,
    responses(
        (status = 200, description = "Session updated", body = WorkoutSessionResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn update_session(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<UpdateWorkoutSession>,
) -> AppResult<Json<WorkoutSessionResponse>> {
    let session = state
        .workout_service
        .update_session(current_user.id, session_id, payload)
        .await?;

    Ok(Json(WorkoutSessionResponse::from(session)))
}

/// Delete a session with all its lifts and metcons
#[utoipa::path(
    delete,
    path = "/sessions/{session_id}",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(session_id): Path<Uuid>,
) -> AppResult<NoContent> {
    if !state
        .workout_service
        .delete_session(current_user.id, session_id)
        .await?
    {
        return Err(AppError::NotFound);
    }
    Ok(NoContent)
}
