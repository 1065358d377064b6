//! User service - account profile use cases.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{UnitOfWork, UserChanges};

/// Profile changes a user may apply to their own account.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Update profile fields. An email change is checked for conflicts
    /// case-insensitively.
    async fn update_profile(&self, id: Uuid, changes: UpdateProfile) -> AppResult<User>;

    /// Change password after verifying the current one.
    async fn change_password(
        &self,
        id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()>;

    /// Permanently delete the account and all of its workout data.
    async fn delete_account(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn update_profile(&self, id: Uuid, changes: UpdateProfile) -> AppResult<User> {
        if let Some(ref email) = changes.email {
            if let Some(existing) = self.uow.users().find_by_email(email).await? {
                if existing.id != id {
                    return Err(AppError::conflict("User"));
                }
            }
        }

        self.uow
            .users()
            .update(
                id,
                UserChanges {
                    email: changes.email,
                    display_name: changes.display_name,
                    ..Default::default()
                },
            )
            .await
    }

    async fn change_password(
        &self,
        id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self.get_user(id).await?;

        let stored = Password::from_hash(user.password_hash);
        if !stored.verify(&current_password) {
            return Err(AppError::InvalidCredentials);
        }

        let password_hash = Password::new(&new_password)?.into_string();
        self.uow
            .users()
            .update(
                id,
                UserChanges {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    async fn delete_account(&self, id: Uuid) -> AppResult<()> {
        if !self.uow.users().delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
