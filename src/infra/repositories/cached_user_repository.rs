//! Cache-decorating user repository.
//!
//! Wraps any [`UserRepository`] with read-through caching over the shared
//! in-process cache. Reads consult the cache first and fall back to the
//! inner repository on a miss or a cache failure; every write invalidates
//! the id entry, both the old and new email entries, and the user's
//! `owner:{id}:*` group before it returns, so neither a stale user nor a
//! stale workout read survives the mutation.

use async_trait::async_trait;
use uuid::Uuid;

use super::user_repository::{UserChanges, UserRepository};
use crate::domain::User;
use crate::errors::AppResult;
use crate::infra::cache::Cache;

/// Read-through caching decorator over a user repository.
pub struct CachedUserStore<R> {
    inner: R,
    cache: Cache,
}

impl<R: UserRepository> CachedUserStore<R> {
    pub fn new(inner: R, cache: Cache) -> Self {
        Self { inner, cache }
    }

    /// Cache lookup that degrades to a miss on failure.
    async fn cached_user(&self, id: &Uuid) -> Option<User> {
        match self.cache.get_user(id).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!("User cache read failed, falling back to store: {}", e);
                None
            }
        }
    }

    async fn cached_user_by_email(&self, email: &str) -> Option<User> {
        match self.cache.get_user_by_email(email).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!("User cache read failed, falling back to store: {}", e);
                None
            }
        }
    }

    /// Populate both id and email entries for a freshly loaded user.
    async fn prime(&self, user: &User) {
        if let Err(e) = self.cache.set_user(user).await {
            tracing::warn!("User cache write failed: {}", e);
        }
        if let Err(e) = self.cache.set_user_by_email(&user.email, user).await {
            tracing::warn!("User cache write failed: {}", e);
        }
    }

    async fn invalidate(&self, id: &Uuid, email: &str) -> AppResult<()> {
        self.cache.invalidate_user(id, email).await?;
        // Workout reads are cached under the owner's key group; a deleted
        // account must not keep serving them to a still-valid token
        self.cache.invalidate_owner(id).await?;
        Ok(())
    }
}

#[async_trait]
impl<R: UserRepository> UserRepository for CachedUserStore<R> {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        if let Some(user) = self.cached_user(&id).await {
            return Ok(Some(user));
        }

        let user = self.inner.find_by_id(id).await?;
        if let Some(ref user) = user {
            self.prime(user).await;
        }
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        if let Some(user) = self.cached_user_by_email(email).await {
            return Ok(Some(user));
        }

        let user = self.inner.find_by_email(email).await?;
        if let Some(ref user) = user {
            self.prime(user).await;
        }
        Ok(user)
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        display_name: String,
    ) -> AppResult<User> {
        // Nothing to invalidate; entries appear on first read
        self.inner.create(email, password_hash, display_name).await
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        // The pre-update email may differ from the updated one; drop both
        // so neither key serves the old record
        let old_email = self.inner.find_by_id(id).await?.map(|u| u.email);

        let user = self.inner.update(id, changes).await?;

        if let Some(old_email) = old_email {
            self.invalidate(&id, &old_email).await?;
        }
        self.invalidate(&user.id, &user.email).await?;
        Ok(user)
    }

    async fn record_login(&self, id: Uuid) -> AppResult<()> {
        let email = self.inner.find_by_id(id).await?.map(|u| u.email);

        self.inner.record_login(id).await?;

        if let Some(email) = email {
            self.invalidate(&id, &email).await?;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let email = self.inner.find_by_id(id).await?.map(|u| u.email);

        let deleted = self.inner.delete(id).await?;

        if let Some(email) = email {
            self.invalidate(&id, &email).await?;
        }
        Ok(deleted)
    }
}
