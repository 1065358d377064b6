//! Metcon workout handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{MetconWorkoutResponse, NewMetconWorkout, UpdateMetconWorkout};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Routes nested under /sessions/:session_id/metcons
pub fn session_metcon_routes() -> Router<AppState> {
    Router::new().route("/", get(list_metcons).post(create_metcon))
}

/// Top-level /metcons/:metcon_id routes
pub fn metcon_routes() -> Router<AppState> {
    Router::new().route(
        "/:metcon_id",
        get(get_metcon).put(update_metcon).delete(delete_metcon),
    )
}

/// Log a metcon with its movements in a session
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/metcons",
    tag = "Metcons",
    security(("bearer_auth" = [])),
    params(("session_id" = Uuid, Path, description = "Session id")),
    request_body = NewMetconWorkout,
    responses(
        (status = 201, description = "Metcon logged", body = MetconWorkoutResponse),
        (status = 400, description = "Validation error or invalid type reference"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn create_metcon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<NewMetconWorkout>,
) -> AppResult<Created<MetconWorkoutResponse>> {
    let metcon = state
        .workout_service
        .add_metcon(current_user.id, session_id, payload)
        .await?;

    Ok(Created(MetconWorkoutResponse::from(metcon)))
}

/// List a session's metcons in display order
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/metcons",
    tag = "Metcons",
    security(("bearer_auth" = [])),
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Metcons in display order", body = [MetconWorkoutResponse]),
        (status = 404, description = "Session not found")
    )
)]
pub async fn list_metcons(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<Vec<MetconWorkoutResponse>>> {
    let metcons = state
        .workout_service
        .list_metcons(current_user.id, session_id)
        .await?;

    Ok(Json(
        metcons
            .into_iter()
            .map(MetconWorkoutResponse::from)
            .collect(),
    ))
}

/// Get one metcon by id, movements included
#[utoipa::path(
    get,
    path = "/metcons/{metcon_id}",
    tag = "Metcons",
    security(("bearer_auth" = [])),
    params(("metcon_id" = Uuid, Path, description = "Metcon id")),
    responses(
        (status = 200, description = "Metcon", body = MetconWorkoutResponse),
        (status = 404, description = "Metcon not found")
    )
)]
pub async fn get_metcon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(metcon_id): Path<Uuid>,
) -> AppResult<Json<MetconWorkoutResponse>> {
    let metcon = state
        .workout_service
        .get_metcon(current_user.id, metcon_id)
        .await?;

    Ok(Json(MetconWorkoutResponse::from(metcon)))
}

/// Update a metcon; a movement list in the payload replaces the set
#[utoipa::path(
    put,
    path = "/metcons/{metcon_id}",
    tag = "Metcons",
    security(("bearer_auth" = [])),
    params(("metcon_id" = Uuid, Path, description = "Metcon id")),
    request_body = UpdateMetconWorkout,
    responses(
        (status = 200, description = "Metcon updated", body = MetconWorkoutResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Metcon not found")
    )
)]
pub async fn update_metcon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(metcon_id): Path<Uuid>,
    Json(payload): Json<UpdateMetconWorkout>,
) -> AppResult<Json<MetconWorkoutResponse>> {
    let metcon = state
        .workout_service
        .update_metcon(current_user.id, metcon_id, payload)
        .await?;

    Ok(Json(MetconWorkoutResponse::from(metcon)))
}

/// Delete a metcon and its movements
#[utoipa::path(
    delete,
    path = "/metcons/{metcon_id}",
    tag = "Metcons",
    security(("bearer_auth" = [])),
    params(("metcon_id" = Uuid, Path, description = "Metcon id")),
    responses(
        (status = 204, description = "Metcon deleted"),
        (status = 404, description = "Metcon not found")
    )
)]
pub async fn delete_metcon(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(metcon_id): Path<Uuid>,
) -> AppResult<NoContent> {
    if !state
        .workout_service
        .delete_metcon(current_user.id, metcon_id)
        .await?
    {
        return Err(AppError::NotFound);
    }
    Ok(NoContent)
}
