//! User repository trait and SeaORM-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::user::{self, Entity as UserEntity};
use crate::config::ROLE_USER;
use crate::domain::User;
use crate::errors::{AppResult, OptionExt};

/// Field changes for a user update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<String>,
}

/// User data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user with the default role.
    async fn create(
        &self,
        email: String,
        password_hash: String,
        display_name: String,
    ) -> AppResult<User>;

    /// Apply field changes to an existing user.
    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;

    /// Stamp a successful login.
    async fn record_login(&self, id: Uuid) -> AppResult<()>;

    /// Delete a user. Returns `false` when no row matched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// SeaORM-backed user store.
pub struct UserStore {
    db: Arc<DatabaseConnection>,
}

impl UserStore {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let model = UserEntity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(user::Column::Email))).eq(email.to_lowercase()),
            )
            .one(self.db.as_ref())
            .await?;
        Ok(model.map(User::from))
    }

    async fn create(
        &self,
        email: String,
        password_hash: String,
        display_name: String,
    ) -> AppResult<User> {
        let now = Utc::now();
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            display_name: Set(display_name),
            role: Set(ROLE_USER.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            last_login_at: Set(None),
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        Ok(User::from(model))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(display_name) = changes.display_name {
            active.display_name = Set(display_name);
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = changes.role {
            active.role = Set(role);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.db.as_ref()).await?;
        Ok(User::from(model))
    }

    async fn record_login(&self, id: Uuid) -> AppResult<()> {
        let model = UserEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await?
            .ok_or_not_found()?;

        let mut active: user::ActiveModel = model.into();
        active.last_login_at = Set(Some(Utc::now()));
        active.update(self.db.as_ref()).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }
}
