//! Strength lift handlers.
//!
//! Collection routes live under the owning session; item routes are
//! top-level so a lift can be addressed without repeating its session.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use uuid::Uuid;

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{NewStrengthLift, StrengthLiftResponse, UpdateStrengthLift};
use crate::errors::{AppError, AppResult};
use crate::types::{Created, NoContent};

/// Routes nested under /sessions/:session_id/lifts
pub fn session_lift_routes() -> Router<AppState> {
    Router::new().route("/", get(list_lifts).post(create_lift))
}

/// Top-level /lifts/:lift_id routes
pub fn lift_routes() -> Router<AppState> {
    Router::new().route(
        "/:lift_id",
        get(get_lift).put(update_lift).delete(delete_lift),
    )
}

/// Log a strength lift in a session
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/lifts",
    tag = "Strength Lifts",
    security(("bearer_auth" = [])),
    params(("session_id" = Uuid, Path, description = "Session id")),
    request_body = NewStrengthLift,
    responses(
        (status = 201, description = "Lift logged", body = StrengthLiftResponse),
        (status = 400, description = "Validation error or invalid exercise type"),
        (status = 404, description = "Session not found")
    )
)]
pub async fn create_lift(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<NewStrengthLift>,
) -> AppResult<Created<StrengthLiftResponse>> {
    let lift = state
        .workout_service
        .add_lift(current_user.id, session_id, payload)
        .await?;

    Ok(Created(StrengthLiftResponse::from(lift)))
}

/// List a session's lifts in display order
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/lifts",
    tag = "Strength Lifts",
    security(("bearer_auth" = [])),
    params(("session_id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Lifts in display order", body = [StrengthLiftResponse]),
        (status = 404, description = "Session not found")
    )
)]
pub async fn list_lifts(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<Vec<StrengthLiftResponse>>> {
    let lifts = state
        .workout_service
        .list_lifts(current_user.id, session_id)
        .await?;

    Ok(Json(
        lifts.into_iter().map(StrengthLiftResponse::from).collect(),
    ))
}

/// Get one lift by id
#[utoipa::path(
    get,
    path = "/lifts/{lift_id}",
    tag = "Strength Lifts",
    security(("bearer_auth" = [])),
    params(("lift_id" = Uuid, Path, description = "Lift id")),
    responses(
        (status = 200, description = "Lift", body = StrengthLiftResponse),
        (status = 404, description = "Lift not found")
    )
)]
pub async fn get_lift(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(lift_id): Path<Uuid>,
) -> AppResult<Json<StrengthLiftResponse>> {
    let lift = state
        .workout_service
        .get_lift(current_user.id, lift_id)
        .await?;

    Ok(Json(StrengthLiftResponse::from(lift)))
}

/// Update a lift
#[utoipa::path(
    put,
    path = "/lifts/{lift_id}",
    tag = "Strength Lifts",
    security(("bearer_auth" = [])),
    params(("lift_id" = Uuid, Path, description = "Lift id")),
    request_body = UpdateStrengthLift,
    responses(
        (status = 200, description = "Lift updated", body = StrengthLiftResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Lift not found")
    )
)]
pub async fn update_lift(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(lift_id): Path<Uuid>,
    Json(payload): Json<UpdateStrengthLift>,
) -> AppResult<Json<StrengthLiftResponse>> {
    let lift = state
        .workout_service
        .update_lift(current_user.id, lift_id, payload)
        .await?;

    Ok(Json(StrengthLiftResponse::from(lift)))
}

/// Delete a lift; remaining lifts keep their order values
#[utoipa::path(
    delete,
    path = "/lifts/{lift_id}",
    tag = "Strength Lifts",
    security(("bearer_auth" = [])),
    params(("lift_id" = Uuid, Path, description = "Lift id")),
    responses(
        (status = 204, description = "Lift deleted"),
        (status = 404, description = "Lift not found")
    )
)]
pub async fn delete_lift(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(lift_id): Path<Uuid>,
) -> AppResult<NoContent> {
    if !state
        .workout_service
        .delete_lift(current_user.id, lift_id)
        .await?
    {
        return Err(AppError::NotFound);
    }
    Ok(NoContent)
}
