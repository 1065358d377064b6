//! Integration tests for API endpoints.
//!
//! These tests drive the full router with mock services injected through
//! the application state, so no database or live cache fixtures are
//! needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::{NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use trainlog::api::{create_router, AppState};
use trainlog::domain::{
    CatalogDeleteOutcome, CatalogItem, CatalogKind, MetconWorkoutDetail, NewCatalogItem,
    NewMetconWorkout, NewStrengthLift, NewWorkoutSession, StrengthLift, UpdateCatalogItem,
    UpdateMetconWorkout, UpdateStrengthLift, UpdateWorkoutSession, User, UserRole, WorkoutSession,
};
use trainlog::errors::{AppError, AppResult};
use trainlog::infra::{Cache, Database, SessionFilter};
use trainlog::services::{
    AuthService, CatalogService, Claims, TokenResponse, UpdateProfile, UserService, WorkoutService,
};
use trainlog::types::PaginationParams;

const VALID_TOKEN: &str = "valid-test-token";
const ADMIN_TOKEN: &str = "valid-admin-token";

fn test_user_id() -> Uuid {
    Uuid::nil()
}

fn test_user(role: UserRole) -> User {
    User {
        id: test_user_id(),
        email: "athlete@example.com".to_string(),
        password_hash: "hashed".to_string(),
        display_name: "Athlete".to_string(),
        role,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        last_login_at: None,
    }
}

// =============================================================================
// Mock Services
// =============================================================================

/// Mock auth service that accepts two fixed tokens
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(
        &self,
        email: String,
        _password: String,
        display_name: String,
    ) -> AppResult<User> {
        Ok(User {
            id: Uuid::new_v4(),
            email,
            password_hash: "hashed".to_string(),
            display_name,
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        })
    }

    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let role = match token {
            VALID_TOKEN => "user",
            ADMIN_TOKEN => "admin",
            _ => return Err(AppError::Unauthorized),
        };
        Ok(Claims {
            sub: test_user_id(),
            email: "athlete@example.com".to_string(),
            role: role.to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }
}

/// Mock user service returning the fixed test user
struct MockUserService;

#[async_trait]
impl UserService for MockUserService {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        if id == test_user_id() {
            Ok(test_user(UserRole::User))
        } else {
            Err(AppError::NotFound)
        }
    }

    async fn update_profile(&self, _id: Uuid, changes: UpdateProfile) -> AppResult<User> {
        let mut user = test_user(UserRole::User);
        if let Some(display_name) = changes.display_name {
            user.display_name = display_name;
        }
        Ok(user)
    }

    async fn change_password(
        &self,
        _id: Uuid,
        _current_password: String,
        _new_password: String,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn delete_account(&self, _id: Uuid) -> AppResult<()> {
        Ok(())
    }
}

/// Mock workout service that owns no data: every lookup misses
struct MockWorkoutService;

#[async_trait]
impl WorkoutService for MockWorkoutService {
    async fn create_session(
        &self,
        user_id: Uuid,
        input: NewWorkoutSession,
    ) -> AppResult<WorkoutSession> {
        Ok(WorkoutSession {
            id: Uuid::new_v4(),
            user_id,
            date: input.date,
            notes: input.notes,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    async fn get_session(&self, _user_id: Uuid, _id: Uuid) -> AppResult<WorkoutSession> {
        Err(AppError::NotFound)
    }

    async fn list_sessions(
        &self,
        _user_id: Uuid,
        _filter: SessionFilter,
        _params: &PaginationParams,
    ) -> AppResult<(Vec<WorkoutSession>, u64)> {
        Ok((vec![], 0))
    }

    async fn update_session(
        &self,
        _user_id: Uuid,
        _id: Uuid,
        _input: UpdateWorkoutSession,
    ) -> AppResult<WorkoutSession> {
        Err(AppError::NotFound)
    }

    async fn delete_session(&self, _user_id: Uuid, _id: Uuid) -> AppResult<bool> {
        Ok(false)
    }

    async fn add_lift(
        &self,
        _user_id: Uuid,
        _session_id: Uuid,
        _input: NewStrengthLift,
    ) -> AppResult<StrengthLift> {
        Err(AppError::NotFound)
    }

    async fn get_lift(&self, _user_id: Uuid, _id: Uuid) -> AppResult<StrengthLift> {
        Err(AppError::NotFound)
    }

    async fn list_lifts(&self, _user_id: Uuid, _session_id: Uuid) -> AppResult<Vec<StrengthLift>> {
        Ok(vec![])
    }

    async fn update_lift(
        &self,
        _user_id: Uuid,
        _id: Uuid,
        _input: UpdateStrengthLift,
    ) -> AppResult<StrengthLift> {
        Err(AppError::NotFound)
    }

    async fn delete_lift(&self, _user_id: Uuid, _id: Uuid) -> AppResult<bool> {
        Ok(false)
    }

    async fn add_metcon(
        &self,
        _user_id: Uuid,
        _session_id: Uuid,
        _input: NewMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail> {
        Err(AppError::NotFound)
    }

    async fn get_metcon(&self, _user_id: Uuid, _id: Uuid) -> AppResult<MetconWorkoutDetail> {
        Err(AppError::NotFound)
    }

    async fn list_metcons(
        &self,
        _user_id: Uuid,
        _session_id: Uuid,
    ) -> AppResult<Vec<MetconWorkoutDetail>> {
        Ok(vec![])
    }

    async fn update_metcon(
        &self,
        _user_id: Uuid,
        _id: Uuid,
        _input: UpdateMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail> {
        Err(AppError::NotFound)
    }

    async fn delete_metcon(&self, _user_id: Uuid, _id: Uuid) -> AppResult<bool> {
        Ok(false)
    }
}

/// Mock catalog service over a single active exercise
struct MockCatalogService;

fn test_catalog_item(kind: CatalogKind) -> CatalogItem {
    CatalogItem {
        id: Uuid::new_v4(),
        kind,
        name: "Back Squat".to_string(),
        description: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl CatalogService for MockCatalogService {
    async fn list(&self, kind: CatalogKind) -> AppResult<Vec<CatalogItem>> {
        Ok(vec![test_catalog_item(kind)])
    }

    async fn list_all(&self, kind: CatalogKind) -> AppResult<Vec<CatalogItem>> {
        Ok(vec![test_catalog_item(kind)])
    }

    async fn get(&self, _kind: CatalogKind, _id: Uuid) -> AppResult<CatalogItem> {
        Err(AppError::NotFound)
    }

    async fn create(&self, kind: CatalogKind, input: NewCatalogItem) -> AppResult<CatalogItem> {
        let mut item = test_catalog_item(kind);
        item.name = input.name;
        Ok(item)
    }

    async fn update(
        &self,
        _kind: CatalogKind,
        _id: Uuid,
        _input: UpdateCatalogItem,
    ) -> AppResult<CatalogItem> {
        Err(AppError::NotFound)
    }

    async fn delete(&self, _kind: CatalogKind, _id: Uuid) -> AppResult<CatalogDeleteOutcome> {
        Ok(CatalogDeleteOutcome::NotFound)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> axum::Router {
    let state = AppState::new(
        Arc::new(MockAuthService),
        Arc::new(MockUserService),
        Arc::new(MockWorkoutService),
        Arc::new(MockCatalogService),
        Arc::new(Cache::new(64)),
        Arc::new(Database::from_connection(
            sea_orm::DatabaseConnection::default(),
        )),
    );
    create_router(state)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_returns_welcome() {
    let app = test_app();
    let response = app.oneshot(get_request("/", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Trainlog API");
}

#[tokio::test]
async fn test_register_returns_created_user() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/register",
            None,
            json!({
                "email": "new@example.com",
                "password": "secure-password",
                "display_name": "New Athlete"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["email"], "new@example.com");
    // The password hash never leaves the server
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/register",
            None,
            json!({
                "email": "new@example.com",
                "password": "short",
                "display_name": "New Athlete"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body.to_string().contains("password"));
}

#[tokio::test]
async fn test_login_returns_bearer_token() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            None,
            json!({
                "email": "athlete@example.com",
                "password": "secure-password"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_protected_route_without_token_is_unauthorized() {
    let app = test_app();
    let response = app.oneshot(get_request("/users/me", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_bad_token_is_unauthorized() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/users/me", Some("forged")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_with_valid_token() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/users/me", Some(VALID_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], "athlete@example.com");
}

// =============================================================================
// Workout Routes
// =============================================================================

#[tokio::test]
async fn test_list_sessions_returns_empty_page() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/sessions", Some(VALID_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_get_foreign_session_is_not_found() {
    let app = test_app();
    let uri = format!("/sessions/{}", Uuid::new_v4());
    let response = app
        .oneshot(get_request(&uri, Some(VALID_TOKEN)))
        .await
        .unwrap();

    // Rows owned by other users are indistinguishable from missing ones
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_session_returns_created() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/sessions",
            Some(VALID_TOKEN),
            json!({ "date": "2024-03-01", "notes": "heavy day" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["date"], "2024-03-01");
}

#[tokio::test]
async fn test_delete_missing_session_is_not_found() {
    let app = test_app();
    let uri = format!("/sessions/{}", Uuid::new_v4());
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header(header::AUTHORIZATION, format!("Bearer {}", VALID_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Catalog Routes
// =============================================================================

#[tokio::test]
async fn test_list_catalog_kind() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/catalog/exercise", Some(VALID_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body[0]["name"], "Back Squat");
}

#[tokio::test]
async fn test_unknown_catalog_kind_is_not_found() {
    let app = test_app();
    let response = app
        .oneshot(get_request("/catalog/yoga", Some(VALID_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_catalog_write_requires_admin() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/catalog/exercise",
            Some(VALID_TOKEN),
            json!({ "name": "Front Squat" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_catalog_write_as_admin() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/catalog/exercise",
            Some(ADMIN_TOKEN),
            json!({ "name": "Front Squat" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Front Squat");
}

#[tokio::test]
async fn test_inactive_listing_requires_admin() {
    let app = test_app();
    let response = app
        .oneshot(get_request(
            "/catalog/exercise?include_inactive=true",
            Some(VALID_TOKEN),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_session_date_format_is_validated() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/sessions",
            Some(VALID_TOKEN),
            json!({ "date": "not-a-date" }),
        ))
        .await
        .unwrap();

    // Malformed payloads are rejected before reaching the service
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_date_helper_parses_expected_format() {
    assert!(NaiveDate::parse_from_str("2024-03-01", "%Y-%m-%d").is_ok());
}
