//! Account profile handlers. All routes operate on the authenticated
//! user; there is no cross-account access.

use axum::{
    extract::State,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::UpdateProfile;
use crate::types::NoContent;

/// Profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    /// New email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "athlete@example.com")]
    pub email: Option<String>,
    /// New display name
    #[validate(length(min = 1, message = "Display name must not be empty"))]
    #[schema(example = "Jane Lifts")]
    pub display_name: Option<String>,
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Current password
    pub current_password: String,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub new_password: String,
}

/// Create account profile routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/me",
            get(get_profile).put(update_profile).delete(delete_account),
        )
        .route("/me/password", put(change_password))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.user_service.get_user(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/users/me",
    tag = "Account",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_profile(
            current_user.id,
            UpdateProfile {
                email: payload.email,
                display_name: payload.display_name,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Change the authenticated user's password
#[utoipa::path(
    put,
    path = "/users/me/password",
    tag = "Account",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 401, description = "Current password incorrect")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<NoContent> {
    state
        .user_service
        .change_password(
            current_user.id,
            payload.current_password,
            payload.new_password,
        )
        .await?;

    Ok(NoContent)
}

/// Delete the authenticated user's account and all workout data
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<NoContent> {
    state.user_service.delete_account(current_user.id).await?;
    Ok(NoContent)
}
