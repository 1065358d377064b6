//! Workout session repository.
//!
//! Every operation takes the owning `user_id` and filters on it, so a
//! session belonging to someone else is indistinguishable from one that
//! does not exist.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::workout_session::{self, Entity as SessionEntity};
use crate::domain::{NewWorkoutSession, UpdateWorkoutSession, WorkoutSession};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

/// Optional date-range filter for session listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Workout session data access operations, scoped to an owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Create a session for the user. Fails validation on a future date
    /// and conflicts when the user already has a session on that date.
    async fn create(&self, user_id: Uuid, input: NewWorkoutSession) -> AppResult<WorkoutSession>;

    /// Find the user's session by id.
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<WorkoutSession>>;

    /// List the user's sessions, newest date first.
    async fn list(
        &self,
        user_id: Uuid,
        filter: SessionFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<WorkoutSession>, u64)>;

    /// Update the user's session.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateWorkoutSession,
    ) -> AppResult<WorkoutSession>;

    /// Delete the user's session and, via cascade, its logged workouts.
    /// Returns `false` when no owned row matched.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// SeaORM-backed session store.
pub struct WorkoutSessionStore {
    db: Arc<DatabaseConnection>,
}

impl WorkoutSessionStore {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<workout_session::Model>> {
        SessionEntity::find_by_id(id)
            .filter(workout_session::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)
    }

    async fn date_taken(&self, user_id: Uuid, date: NaiveDate, exclude: Option<Uuid>) -> AppResult<bool> {
        let mut query = SessionEntity::find()
            .filter(workout_session::Column::UserId.eq(user_id))
            .filter(workout_session::Column::Date.eq(date));
        if let Some(id) = exclude {
            query = query.filter(workout_session::Column::Id.ne(id));
        }
        Ok(query.count(self.db.as_ref()).await? > 0)
    }
}

#[async_trait]
impl SessionRepository for WorkoutSessionStore {
    async fn create(&self, user_id: Uuid, input: NewWorkoutSession) -> AppResult<WorkoutSession> {
        if !WorkoutSession::date_not_in_future(input.date) {
            return Err(AppError::validation("date must not be in the future"));
        }
        if self.date_taken(user_id, input.date, None).await? {
            return Err(AppError::conflict("A session on this date"));
        }

        let now = Utc::now();
        let active_model = workout_session::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            date: Set(input.date),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.db.as_ref()).await?;
        Ok(WorkoutSession::from(model))
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<WorkoutSession>> {
        let model = self.find_owned(user_id, id).await?;
        Ok(model.map(WorkoutSession::from))
    }

    async fn list(
        &self,
        user_id: Uuid,
        filter: SessionFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<WorkoutSession>, u64)> {
        let mut query = SessionEntity::find()
            .filter(workout_session::Column::UserId.eq(user_id));

        if let Some(from) = filter.from {
            query = query.filter(workout_session::Column::Date.gte(from));
        }
        if let Some(to) = filter.to {
            query = query.filter(workout_session::Column::Date.lte(to));
        }

        let paginator = query
            .order_by_desc(workout_session::Column::Date)
            .paginate(self.db.as_ref(), params.limit());
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(WorkoutSession::from).collect(), total))
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateWorkoutSession,
    ) -> AppResult<WorkoutSession> {
        let model = self.find_owned(user_id, id).await?.ok_or_not_found()?;

        if let Some(date) = input.date {
            if !WorkoutSession::date_not_in_future(date) {
                return Err(AppError::validation("date must not be in the future"));
            }
            if self.date_taken(user_id, date, Some(id)).await? {
                return Err(AppError::conflict("A session on this date"));
            }
        }

        let mut active: workout_session::ActiveModel = model.into();
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(Some(notes));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(self.db.as_ref()).await?;
        Ok(WorkoutSession::from(model))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = SessionEntity::delete_many()
            .filter(workout_session::Column::Id.eq(id))
            .filter(workout_session::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await?;

        Ok(result.rows_affected > 0)
    }
}
