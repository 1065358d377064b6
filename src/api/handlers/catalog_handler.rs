//! Catalog handlers.
//!
//! One set of routes serves all three catalogs; the `kind` path segment
//! (`exercise`, `metcon`, `movement`) selects which. Reads are open to
//! any authenticated user, writes require the admin role.

use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{
    CatalogDeleteOutcome, CatalogItemResponse, CatalogKind, NewCatalogItem, UpdateCatalogItem,
};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, Created, NoContent};

/// Catalog list query parameters
#[derive(Debug, Deserialize)]
pub struct ListCatalogQuery {
    /// Include deactivated entries (admin only)
    #[serde(default)]
    pub include_inactive: bool,
}

/// Create catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/:kind", get(list_items).post(create_item))
        .route(
            "/:kind/:item_id",
            get(get_item).put(update_item).delete(delete_item),
        )
}

fn parse_kind(kind: &str) -> AppResult<CatalogKind> {
    CatalogKind::from_str(kind).map_err(|_| AppError::NotFound)
}

/// List catalog entries of one kind
#[utoipa::path(
    get,
    path = "/catalog/{kind}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "Catalog kind: exercise, metcon or movement"),
        ("include_inactive" = Option<bool>, Query, description = "Include deactivated entries (admin)")
    ),
    responses(
        (status = 200, description = "Catalog entries by name", body = [CatalogItemResponse]),
        (status = 404, description = "Unknown catalog kind")
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(kind): Path<String>,
    Query(query): Query<ListCatalogQuery>,
) -> AppResult<Json<Vec<CatalogItemResponse>>> {
    let kind = parse_kind(&kind)?;

    let items = if query.include_inactive {
        require_admin(&current_user)?;
        state.catalog_service.list_all(kind).await?
    } else {
        state.catalog_service.list(kind).await?
    };

    Ok(Json(
        items.into_iter().map(CatalogItemResponse::from).collect(),
    ))
}

/// Get one catalog entry
#[utoipa::path(
    get,
    path = "/catalog/{kind}/{item_id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "Catalog kind"),
        ("item_id" = Uuid, Path, description = "Entry id")
    ),
    responses(
        (status = 200, description = "Catalog entry", body = CatalogItemResponse),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Extension(_current_user): Extension<CurrentUser>,
    Path((kind, item_id)): Path<(String, Uuid)>,
) -> AppResult<Json<CatalogItemResponse>> {
    let kind = parse_kind(&kind)?;
    let item = state.catalog_service.get(kind, item_id).await?;
    Ok(Json(CatalogItemResponse::from(item)))
}

/// Create a catalog entry (admin)
#[utoipa::path(
    post,
    path = "/catalog/{kind}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("kind" = String, Path, description = "Catalog kind")),
    request_body = NewCatalogItem,
    responses(
        (status = 201, description = "Entry created", body = CatalogItemResponse),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Name already exists in this catalog")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(kind): Path<String>,
    Json(payload): Json<NewCatalogItem>,
) -> AppResult<Created<CatalogItemResponse>> {
    require_admin(&current_user)?;
    let kind = parse_kind(&kind)?;

    let item = state.catalog_service.create(kind, payload).await?;
    Ok(Created(CatalogItemResponse::from(item)))
}

/// Update a catalog entry (admin)
#[utoipa::path(
    put,
    path = "/catalog/{kind}/{item_id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "Catalog kind"),
        ("item_id" = Uuid, Path, description = "Entry id")
    ),
    request_body = UpdateCatalogItem,
    responses(
        (status = 200, description = "Entry updated", body = CatalogItemResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((kind, item_id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateCatalogItem>,
) -> AppResult<Json<CatalogItemResponse>> {
    require_admin(&current_user)?;
    let kind = parse_kind(&kind)?;

    let item = state.catalog_service.update(kind, item_id, payload).await?;
    Ok(Json(CatalogItemResponse::from(item)))
}

/// Delete a catalog entry (admin). Entries referenced by logged
/// workouts are deactivated instead of removed.
#[utoipa::path(
    delete,
    path = "/catalog/{kind}/{item_id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("kind" = String, Path, description = "Catalog kind"),
        ("item_id" = Uuid, Path, description = "Entry id")
    ),
    responses(
        (status = 200, description = "Entry deactivated (still referenced)"),
        (status = 204, description = "Entry deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Entry not found")
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path((kind, item_id)): Path<(String, Uuid)>,
) -> AppResult<axum::response::Response> {
    use axum::response::IntoResponse;

    require_admin(&current_user)?;
    let kind = parse_kind(&kind)?;

    match state.catalog_service.delete(kind, item_id).await? {
        CatalogDeleteOutcome::Deleted => Ok(NoContent.into_response()),
        CatalogDeleteOutcome::Deactivated => Ok(Json(ApiResponse::message(format!(
            "{} is referenced by logged workouts and was deactivated",
            kind.label()
        )))
        .into_response()),
        CatalogDeleteOutcome::NotFound => Err(AppError::NotFound),
    }
}
