//! Workout service - session, lift and metcon use cases.
//!
//! Ownership and validation are enforced by the repositories; this
//! service layers per-owner caching on top. Single session reads are
//! cached under the owner's key group and every write to any of the
//! user's workout data drops that whole group.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::CACHE_TTL_SHORT_SECONDS;
use crate::domain::{
    MetconWorkoutDetail, NewMetconWorkout, NewStrengthLift, NewWorkoutSession, StrengthLift,
    UpdateMetconWorkout, UpdateStrengthLift, UpdateWorkoutSession, WorkoutSession,
};
use crate::errors::{AppError, AppResult};
use crate::infra::{Cache, SessionFilter, UnitOfWork};
use crate::types::PaginationParams;

/// Workout service trait for dependency injection.
///
/// Deletes return `bool` and are idempotent; handlers translate `false`
/// into a not-found response.
#[async_trait]
pub trait WorkoutService: Send + Sync {
    // Sessions
    async fn create_session(
        &self,
        user_id: Uuid,
        input: NewWorkoutSession,
    ) -> AppResult<WorkoutSession>;
    async fn get_session(&self, user_id: Uuid, id: Uuid) -> AppResult<WorkoutSession>;
    async fn list_sessions(
        &self,
        user_id: Uuid,
        filter: SessionFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<WorkoutSession>, u64)>;
    async fn update_session(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateWorkoutSession,
    ) -> AppResult<WorkoutSession>;
    async fn delete_session(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;

    // Strength lifts
    async fn add_lift(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: NewStrengthLift,
    ) -> AppResult<StrengthLift>;
    async fn get_lift(&self, user_id: Uuid, id: Uuid) -> AppResult<StrengthLift>;
    async fn list_lifts(&self, user_id: Uuid, session_id: Uuid) -> AppResult<Vec<StrengthLift>>;
    async fn update_lift(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateStrengthLift,
    ) -> AppResult<StrengthLift>;
    async fn delete_lift(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;

    // Metcons
    async fn add_metcon(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: NewMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail>;
    async fn get_metcon(&self, user_id: Uuid, id: Uuid) -> AppResult<MetconWorkoutDetail>;
    async fn list_metcons(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> AppResult<Vec<MetconWorkoutDetail>>;
    async fn update_metcon(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail>;
    async fn delete_metcon(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// Concrete implementation of WorkoutService using Unit of Work.
pub struct WorkoutManager<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Cache,
}

impl<U: UnitOfWork> WorkoutManager<U> {
    pub fn new(uow: Arc<U>, cache: Cache) -> Self {
        Self { uow, cache }
    }

    fn session_key(user_id: &Uuid, id: &Uuid) -> String {
        format!("owner:{}:session:{}", user_id, id)
    }

    /// Drop every cached entry belonging to this user's workout data.
    async fn invalidate(&self, user_id: &Uuid) -> AppResult<()> {
        self.cache.invalidate_owner(user_id).await?;
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> WorkoutService for WorkoutManager<U> {
    async fn create_session(
        &self,
        user_id: Uuid,
        input: NewWorkoutSession,
    ) -> AppResult<WorkoutSession> {
        let session = self.uow.sessions().create(user_id, input).await?;
        self.invalidate(&user_id).await?;
        Ok(session)
    }

    async fn get_session(&self, user_id: Uuid, id: Uuid) -> AppResult<WorkoutSession> {
        let key = Self::session_key(&user_id, &id);

        // A cache failure degrades to a repository read
        match self.cache.get::<WorkoutSession>(&key).await {
            Ok(Some(session)) => return Ok(session),
            Ok(None) => {}
            Err(e) => tracing::warn!("Session cache read failed: {}", e),
        }

        let session = self
            .uow
            .sessions()
            .find_by_id(user_id, id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Err(e) = self
            .cache
            .set_with_ttl(&key, &session, CACHE_TTL_SHORT_SECONDS)
            .await
        {
            tracing::warn!("Session cache write failed: {}", e);
        }
        Ok(session)
    }

    async fn list_sessions(
        &self,
        user_id: Uuid,
        filter: SessionFilter,
        params: &PaginationParams,
    ) -> AppResult<(Vec<WorkoutSession>, u64)> {
        self.uow.sessions().list(user_id, filter, params).await
    }

    async fn update_session(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateWorkoutSession,
    ) -> AppResult<WorkoutSession> {
        let session = self.uow.sessions().update(user_id, id, input).await?;
        self.invalidate(&user_id).await?;
        Ok(session)
    }

    async fn delete_session(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let deleted = self.uow.sessions().delete(user_id, id).await?;
        if deleted {
            self.invalidate(&user_id).await?;
        }
        Ok(deleted)
    }

    async fn add_lift(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: NewStrengthLift,
    ) -> AppResult<StrengthLift> {
        let lift = self.uow.lifts().create(user_id, session_id, input).await?;
        self.invalidate(&user_id).await?;
        Ok(lift)
    }

    async fn get_lift(&self, user_id: Uuid, id: Uuid) -> AppResult<StrengthLift> {
        self.uow
            .lifts()
            .find_by_id(user_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_lifts(&self, user_id: Uuid, session_id: Uuid) -> AppResult<Vec<StrengthLift>> {
        self.uow.lifts().list_for_session(user_id, session_id).await
    }

    async fn update_lift(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateStrengthLift,
    ) -> AppResult<StrengthLift> {
        let lift = self.uow.lifts().update(user_id, id, input).await?;
        self.invalidate(&user_id).await?;
        Ok(lift)
    }

    async fn delete_lift(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let deleted = self.uow.lifts().delete(user_id, id).await?;
        if deleted {
            self.invalidate(&user_id).await?;
        }
        Ok(deleted)
    }

    async fn add_metcon(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: NewMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail> {
        let metcon = self.uow.metcons().create(user_id, session_id, input).await?;
        self.invalidate(&user_id).await?;
        Ok(metcon)
    }

    async fn get_metcon(&self, user_id: Uuid, id: Uuid) -> AppResult<MetconWorkoutDetail> {
        self.uow
            .metcons()
            .find_by_id(user_id, id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_metcons(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> AppResult<Vec<MetconWorkoutDetail>> {
        self.uow
            .metcons()
            .list_for_session(user_id, session_id)
            .await
    }

    async fn update_metcon(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail> {
        let metcon = self.uow.metcons().update(user_id, id, input).await?;
        self.invalidate(&user_id).await?;
        Ok(metcon)
    }

    async fn delete_metcon(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let deleted = self.uow.metcons().delete(user_id, id).await?;
        if deleted {
            self.invalidate(&user_id).await?;
        }
        Ok(deleted)
    }
}
