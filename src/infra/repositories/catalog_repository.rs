//! Catalog repository.
//!
//! One store serves all three catalogs; every operation is keyed by
//! [`CatalogKind`] so an exercise type can never be addressed through the
//! movement endpoints. Entries referenced by logged workouts survive
//! deletion as deactivated rows.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::catalog_item::{self, Entity as CatalogEntity};
use super::entities::{metcon_movement, metcon_workout, strength_lift};
use crate::domain::{
    CatalogDeleteOutcome, CatalogItem, CatalogKind, NewCatalogItem, UpdateCatalogItem,
};
use crate::errors::{AppError, AppResult, OptionExt};

/// Catalog data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Create a catalog entry. Names are unique within a kind.
    async fn create(&self, kind: CatalogKind, input: NewCatalogItem) -> AppResult<CatalogItem>;

    /// Find an entry of the given kind by id.
    async fn find_by_id(&self, kind: CatalogKind, id: Uuid) -> AppResult<Option<CatalogItem>>;

    /// List entries of one kind by name; inactive entries only on request.
    async fn list(&self, kind: CatalogKind, include_inactive: bool) -> AppResult<Vec<CatalogItem>>;

    /// Update an entry of the given kind.
    async fn update(
        &self,
        kind: CatalogKind,
        id: Uuid,
        input: UpdateCatalogItem,
    ) -> AppResult<CatalogItem>;

    /// Delete an entry, or deactivate it when logged workouts reference
    /// it.
    async fn delete_or_deactivate(
        &self,
        kind: CatalogKind,
        id: Uuid,
    ) -> AppResult<CatalogDeleteOutcome>;
}

/// SeaORM-backed catalog store.
pub struct CatalogStore {
    db: Arc<DatabaseConnection>,
}

impl CatalogStore {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    async fn find_model(&self, kind: CatalogKind, id: Uuid) -> AppResult<Option<catalog_item::Model>> {
        CatalogEntity::find_by_id(id)
            .filter(catalog_item::Column::Kind.eq(kind.as_str()))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)
    }

    async fn name_taken(&self, kind: CatalogKind, name: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let mut query = CatalogEntity::find()
            .filter(catalog_item::Column::Kind.eq(kind.as_str()))
            .filter(catalog_item::Column::Name.eq(name));
        if let Some(id) = exclude {
            query = query.filter(catalog_item::Column::Id.ne(id));
        }
        Ok(query.count(self.db.as_ref()).await? > 0)
    }

    /// Count logged-workout rows referencing this entry.
    async fn reference_count(&self, kind: CatalogKind, id: Uuid) -> AppResult<u64> {
        let count = match kind {
            CatalogKind::Exercise => {
                strength_lift::Entity::find()
                    .filter(strength_lift::Column::ExerciseTypeId.eq(id))
                    .count(self.db.as_ref())
                    .await?
            }
            CatalogKind::Metcon => {
                metcon_workout::Entity::find()
                    .filter(metcon_workout::Column::MetconTypeId.eq(id))
                    .count(self.db.as_ref())
                    .await?
            }
            CatalogKind::Movement => {
                metcon_movement::Entity::find()
                    .filter(metcon_movement::Column::MovementTypeId.eq(id))
                    .count(self.db.as_ref())
                    .await?
            }
        };
        Ok(count)
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn create(&self, kind: CatalogKind, input: NewCatalogItem) -> AppResult<CatalogItem> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("name must not be empty"));
        }
        if self.name_taken(kind, &name, None).await? {
            return Err(AppError::conflict(kind.label()));
        }

        let now = Utc::now();
        let active_model = catalog_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind.as_str().to_string()),
            name: Set(name),
            description: Set(input.description),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        Ok(CatalogItem::from(model))
    }

    async fn find_by_id(&self, kind: CatalogKind, id: Uuid) -> AppResult<Option<CatalogItem>> {
        let model = self.find_model(kind, id).await?;
        Ok(model.map(CatalogItem::from))
    }

    async fn list(&self, kind: CatalogKind, include_inactive: bool) -> AppResult<Vec<CatalogItem>> {
        let mut query = CatalogEntity::find().filter(catalog_item::Column::Kind.eq(kind.as_str()));
        if !include_inactive {
            query = query.filter(catalog_item::Column::IsActive.eq(true));
        }

        let models = query
            .order_by_asc(catalog_item::Column::Name)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(CatalogItem::from).collect())
    }

    async fn update(
        &self,
        kind: CatalogKind,
        id: Uuid,
        input: UpdateCatalogItem,
    ) -> AppResult<CatalogItem> {
        let model = self.find_model(kind, id).await?.ok_or_not_found()?;

        let mut active: catalog_item::ActiveModel = model.into();
        if let Some(name) = input.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("name must not be empty"));
            }
            if self.name_taken(kind, &name, Some(id)).await? {
                return Err(AppError::conflict(kind.label()));
            }
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(Some(description));
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.db.as_ref()).await?;
        Ok(CatalogItem::from(model))
    }

    async fn delete_or_deactivate(
        &self,
        kind: CatalogKind,
        id: Uuid,
    ) -> AppResult<CatalogDeleteOutcome> {
        let Some(model) = self.find_model(kind, id).await? else {
            return Ok(CatalogDeleteOutcome::NotFound);
        };

        if self.reference_count(kind, id).await? > 0 {
            let mut active: catalog_item::ActiveModel = model.into();
            active.is_active = Set(false);
            active.updated_at = Set(Utc::now());
            active.update(self.db.as_ref()).await?;
            return Ok(CatalogDeleteOutcome::Deactivated);
        }

        CatalogEntity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(CatalogDeleteOutcome::Deleted)
    }
}
