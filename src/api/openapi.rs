//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, catalog_handler, lift_handler, metcon_handler, session_handler, user_handler,
};
use crate::domain::{
    CatalogItemResponse, CatalogKind, MetconMovementResponse, MetconWorkoutResponse,
    NewCatalogItem, NewMetconMovement, NewMetconWorkout, NewStrengthLift, NewWorkoutSession,
    StrengthLiftResponse, UpdateCatalogItem, UpdateMetconWorkout, UpdateStrengthLift,
    UpdateWorkoutSession, UserResponse, UserRole, WorkoutSessionResponse,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Trainlog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trainlog API",
        version = "0.1.0",
        description = "Workout tracking API - sessions, strength lifts, metcons and reference catalogs",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Account endpoints
        user_handler::get_profile,
        user_handler::update_profile,
        user_handler::change_password,
        user_handler::delete_account,
        // Session endpoints
        session_handler::create_session,
        session_handler::list_sessions,
        session_handler::get_session,
        session_handler::update_session,
        session_handler::delete_session,
        // Lift endpoints
        lift_handler::create_lift,
        lift_handler::list_lifts,
        lift_handler::get_lift,
        lift_handler::update_lift,
        lift_handler::delete_lift,
        // Metcon endpoints
        metcon_handler::create_metcon,
        metcon_handler::list_metcons,
        metcon_handler::get_metcon,
        metcon_handler::update_metcon,
        metcon_handler::delete_metcon,
        // Catalog endpoints
        catalog_handler::list_items,
        catalog_handler::get_item,
        catalog_handler::create_item,
        catalog_handler::update_item,
        catalog_handler::delete_item,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            UserResponse,
            NewWorkoutSession,
            UpdateWorkoutSession,
            WorkoutSessionResponse,
            NewStrengthLift,
            UpdateStrengthLift,
            StrengthLiftResponse,
            NewMetconWorkout,
            UpdateMetconWorkout,
            NewMetconMovement,
            MetconWorkoutResponse,
            MetconMovementResponse,
            CatalogKind,
            NewCatalogItem,
            UpdateCatalogItem,
            CatalogItemResponse,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            TokenResponse,
            // Account handler types
            user_handler::UpdateProfileRequest,
            user_handler::ChangePasswordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Account", description = "Profile and credentials"),
        (name = "Sessions", description = "Workout sessions"),
        (name = "Strength Lifts", description = "Logged strength work"),
        (name = "Metcons", description = "Logged conditioning work"),
        (name = "Catalog", description = "Exercise, metcon and movement reference data")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
