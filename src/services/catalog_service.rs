//! Catalog service - reference data use cases.
//!
//! Listings change rarely, so they are served through the cache with the
//! long TTL class and refreshed on any catalog write.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::CACHE_TTL_LONG_SECONDS;
use crate::domain::{
    CatalogDeleteOutcome, CatalogItem, CatalogKind, NewCatalogItem, UpdateCatalogItem,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, UnitOfWork};

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List active entries of one catalog.
    async fn list(&self, kind: CatalogKind) -> AppResult<Vec<CatalogItem>>;

    /// List entries including deactivated ones (admin view).
    async fn list_all(&self, kind: CatalogKind) -> AppResult<Vec<CatalogItem>>;

    /// Get one entry by id.
    async fn get(&self, kind: CatalogKind, id: Uuid) -> AppResult<CatalogItem>;

    /// Create a catalog entry.
    async fn create(&self, kind: CatalogKind, input: NewCatalogItem) -> AppResult<CatalogItem>;

    /// Update a catalog entry.
    async fn update(
        &self,
        kind: CatalogKind,
        id: Uuid,
        input: UpdateCatalogItem,
    ) -> AppResult<CatalogItem>;

    /// Delete an entry, deactivating it instead when referenced.
    async fn delete(&self, kind: CatalogKind, id: Uuid) -> AppResult<CatalogDeleteOutcome>;
}

/// Concrete implementation of CatalogService using Unit of Work.
pub struct CatalogManager<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Cache,
}

impl<U: UnitOfWork> CatalogManager<U> {
    pub fn new(uow: Arc<U>, cache: Cache) -> Self {
        Self { uow, cache }
    }

    fn list_key(kind: CatalogKind) -> String {
        format!("catalog:{}:active", kind.as_str())
    }

    async fn invalidate(&self, kind: CatalogKind) -> AppResult<()> {
        self.cache.delete(&Self::list_key(kind)).await
    }
}

#[async_trait]
impl<U: UnitOfWork> CatalogService for CatalogManager<U> {
    async fn list(&self, kind: CatalogKind) -> AppResult<Vec<CatalogItem>> {
        let key = Self::list_key(kind);

        match self.cache.get::<Vec<CatalogItem>>(&key).await {
            Ok(Some(items)) => return Ok(items),
            Ok(None) => {}
            Err(e) => tracing::warn!("Catalog cache read failed: {}", e),
        }

        let items = self.uow.catalog().list(kind, false).await?;
        if let Err(e) = self
            .cache
            .set_with_ttl(&key, &items, CACHE_TTL_LONG_SECONDS)
            .await
        {
            tracing::warn!("Catalog cache write failed: {}", e);
        }
        Ok(items)
    }

    async fn list_all(&self, kind: CatalogKind) -> AppResult<Vec<CatalogItem>> {
        self.uow.catalog().list(kind, true).await
    }

    async fn get(&self, kind: CatalogKind, id: Uuid) -> AppResult<CatalogItem> {
        self.uow
            .catalog()
            .find_by_id(kind, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, kind: CatalogKind, input: NewCatalogItem) -> AppResult<CatalogItem> {
        let item = self.uow.catalog().create(kind, input).await?;
        self.invalidate(kind).await?;
        Ok(item)
    }

    async fn update(
        &self,
        kind: CatalogKind,
        id: Uuid,
        input: UpdateCatalogItem,
    ) -> AppResult<CatalogItem> {
        let item = self.uow.catalog().update(kind, id, input).await?;
        self.invalidate(kind).await?;
        Ok(item)
    }

    async fn delete(&self, kind: CatalogKind, id: Uuid) -> AppResult<CatalogDeleteOutcome> {
        let outcome = self.uow.catalog().delete_or_deactivate(kind, id).await?;
        if outcome != CatalogDeleteOutcome::NotFound {
            self.invalidate(kind).await?;
        }
        Ok(outcome)
    }
}
