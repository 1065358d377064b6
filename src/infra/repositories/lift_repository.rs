//! Strength lift repository.
//!
//! Lifts are owned transitively: every query joins through the parent
//! session and filters on its `user_id`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use super::base::{ensure_catalog_ref, max_child_order, resolve_order};
use super::entities::strength_lift::{self, Entity as LiftEntity};
use super::entities::workout_session;
use crate::domain::{CatalogKind, NewStrengthLift, StrengthLift, UpdateStrengthLift};
use crate::errors::{AppError, AppResult, OptionExt};

/// Strength lift data access operations, scoped to an owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiftRepository: Send + Sync {
    /// Create a lift under one of the user's sessions. The session must
    /// be owned; the exercise type must be an active catalog entry.
    async fn create(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: NewStrengthLift,
    ) -> AppResult<StrengthLift>;

    /// Find the user's lift by id.
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StrengthLift>>;

    /// List all lifts of one owned session in display order.
    async fn list_for_session(&self, user_id: Uuid, session_id: Uuid)
        -> AppResult<Vec<StrengthLift>>;

    /// Update the user's lift. The owning session cannot change.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateStrengthLift,
    ) -> AppResult<StrengthLift>;

    /// Delete the user's lift. Returns `false` when no owned row matched.
    /// Remaining siblings keep their order values.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;

    /// Highest display order among the session's lifts, 0 when it has
    /// none. Exposed for callers that pre-compute an order value.
    async fn max_order(&self, user_id: Uuid, session_id: Uuid) -> AppResult<i32>;
}

/// SeaORM-backed lift store.
pub struct StrengthLiftStore {
    db: Arc<DatabaseConnection>,
}

impl StrengthLiftStore {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    /// Load a lift only when its session belongs to the user.
    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<strength_lift::Model>> {
        LiftEntity::find()
            .filter(strength_lift::Column::Id.eq(id))
            .join(JoinType::InnerJoin, strength_lift::Relation::Session.def())
            .filter(workout_session::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(AppError::from)
    }

    async fn session_owned(&self, user_id: Uuid, session_id: Uuid) -> AppResult<bool> {
        use sea_orm::PaginatorTrait;

        let count = workout_session::Entity::find()
            .filter(workout_session::Column::Id.eq(session_id))
            .filter(workout_session::Column::UserId.eq(user_id))
            .count(self.db.as_ref())
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl LiftRepository for StrengthLiftStore {
    async fn create(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: NewStrengthLift,
    ) -> AppResult<StrengthLift> {
        if !self.session_owned(user_id, session_id).await? {
            return Err(AppError::NotFound);
        }
        ensure_catalog_ref(self.db.as_ref(), input.exercise_type_id, CatalogKind::Exercise).await?;

        let max_order = max_child_order::<LiftEntity>(
            self.db.as_ref(),
            strength_lift::Column::SessionId,
            session_id,
            strength_lift::Column::SortOrder,
        )
        .await?;

        let now = Utc::now();
        let lift = StrengthLift {
            id: Uuid::new_v4(),
            session_id,
            exercise_type_id: input.exercise_type_id,
            scheme: input.scheme,
            sets: input.sets,
            reps: input.reps,
            weight: input.weight,
            additional_weight: input.additional_weight,
            duration: input.duration,
            rest_period: input.rest_period,
            comments: input.comments,
            order: resolve_order(input.order, max_order),
            created_at: now,
            updated_at: now,
        };
        lift.validate()?;

        let active_model = strength_lift::ActiveModel {
            id: Set(lift.id),
            session_id: Set(lift.session_id),
            exercise_type_id: Set(lift.exercise_type_id),
            scheme: Set(lift.scheme.clone()),
            sets: Set(lift.sets),
            reps: Set(lift.reps),
            weight: Set(lift.weight),
            additional_weight: Set(lift.additional_weight),
            duration: Set(lift.duration),
            rest_period: Set(lift.rest_period),
            comments: Set(lift.comments.clone()),
            sort_order: Set(lift.order),
            created_at: Set(lift.created_at),
            updated_at: Set(lift.updated_at),
        };
        let model = active_model.insert(self.db.as_ref()).await?;

        Ok(StrengthLift::from(model))
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<StrengthLift>> {
        let model = self.find_owned(user_id, id).await?;
        Ok(model.map(StrengthLift::from))
    }

    async fn list_for_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> AppResult<Vec<StrengthLift>> {
        if !self.session_owned(user_id, session_id).await? {
            return Err(AppError::NotFound);
        }

        let models = LiftEntity::find()
            .filter(strength_lift::Column::SessionId.eq(session_id))
            .order_by_asc(strength_lift::Column::SortOrder)
            .order_by_asc(strength_lift::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(StrengthLift::from).collect())
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateStrengthLift,
    ) -> AppResult<StrengthLift> {
        let model = self.find_owned(user_id, id).await?.ok_or_not_found()?;

        if let Some(exercise_type_id) = input.exercise_type_id {
            ensure_catalog_ref(self.db.as_ref(), exercise_type_id, CatalogKind::Exercise).await?;
        }

        // An order request resolves against the session max, so fetch it
        // only when one is present
        let max_order = match input.order {
            Some(_) => {
                max_child_order::<LiftEntity>(
                    self.db.as_ref(),
                    strength_lift::Column::SessionId,
                    model.session_id,
                    strength_lift::Column::SortOrder,
                )
                .await?
            }
            None => 0,
        };

        // Apply changes to the domain value first so validation sees the
        // final state
        let lift = apply_changes(StrengthLift::from(model.clone()), input, max_order);
        lift.validate()?;

        let mut active: strength_lift::ActiveModel = model.into();
        active.exercise_type_id = Set(lift.exercise_type_id);
        active.scheme = Set(lift.scheme.clone());
        active.sets = Set(lift.sets);
        active.reps = Set(lift.reps);
        active.weight = Set(lift.weight);
        active.additional_weight = Set(lift.additional_weight);
        active.duration = Set(lift.duration);
        active.rest_period = Set(lift.rest_period);
        active.comments = Set(lift.comments.clone());
        active.sort_order = Set(lift.order);
        active.updated_at = Set(lift.updated_at);

        let model = active.update(self.db.as_ref()).await?;
        Ok(StrengthLift::from(model))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let Some(model) = self.find_owned(user_id, id).await? else {
            return Ok(false);
        };

        let result = LiftEntity::delete_by_id(model.id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }

    async fn max_order(&self, user_id: Uuid, session_id: Uuid) -> AppResult<i32> {
        if !self.session_owned(user_id, session_id).await? {
            return Err(AppError::NotFound);
        }

        max_child_order::<LiftEntity>(
            self.db.as_ref(),
            strength_lift::Column::SessionId,
            session_id,
            strength_lift::Column::SortOrder,
        )
        .await
    }
}

/// Merge update fields into the domain value. `None` fields are left
/// unchanged; an order request goes through [`resolve_order`] against the
/// session max, so a non-positive value appends just like create.
fn apply_changes(mut lift: StrengthLift, input: UpdateStrengthLift, max_order: i32) -> StrengthLift {
    if let Some(exercise_type_id) = input.exercise_type_id {
        lift.exercise_type_id = exercise_type_id;
    }
    if let Some(scheme) = input.scheme {
        lift.scheme = Some(scheme);
    }
    if let Some(sets) = input.sets {
        lift.sets = sets;
    }
    if let Some(reps) = input.reps {
        lift.reps = reps;
    }
    if let Some(weight) = input.weight {
        lift.weight = weight;
    }
    if let Some(additional_weight) = input.additional_weight {
        lift.additional_weight = Some(additional_weight);
    }
    if let Some(duration) = input.duration {
        lift.duration = Some(duration);
    }
    if let Some(rest_period) = input.rest_period {
        lift.rest_period = Some(rest_period);
    }
    if let Some(comments) = input.comments {
        lift.comments = Some(comments);
    }
    if let Some(requested) = input.order {
        lift.order = resolve_order(Some(requested), max_order);
    }
    lift.updated_at = Utc::now();
    lift
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    fn base_lift() -> StrengthLift {
        StrengthLift {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            exercise_type_id: Uuid::new_v4(),
            scheme: None,
            sets: 5,
            reps: 5,
            weight: 135.0,
            additional_weight: None,
            duration: None,
            rest_period: None,
            comments: None,
            order: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn update_keeps_positive_requested_order() {
        let input = UpdateStrengthLift {
            order: Some(7),
            ..Default::default()
        };
        assert_eq!(apply_changes(base_lift(), input, 3).order, 7);
    }

    #[test]
    fn update_appends_non_positive_requested_order() {
        let input = UpdateStrengthLift {
            order: Some(0),
            ..Default::default()
        };
        assert_eq!(apply_changes(base_lift(), input, 3).order, 4);

        let input = UpdateStrengthLift {
            order: Some(-1),
            ..Default::default()
        };
        assert_eq!(apply_changes(base_lift(), input, 5).order, 6);
    }

    #[test]
    fn update_without_order_leaves_it_unchanged() {
        let input = UpdateStrengthLift {
            weight: Some(140.0),
            ..Default::default()
        };
        let lift = apply_changes(base_lift(), input, 9);
        assert_eq!(lift.order, 2);
        assert_eq!(lift.weight, 140.0);
    }

    #[tokio::test]
    async fn max_order_requires_an_owned_session() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(0)),
            )])]])
            .into_connection();

        let store = StrengthLiftStore::new(db);
        let err = store
            .max_order(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn max_order_is_zero_for_an_empty_session() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(1)),
            )])]])
            .append_query_results([vec![BTreeMap::from([("max_order", Value::Int(None))])]])
            .into_connection();

        let store = StrengthLiftStore::new(db);
        let max = store
            .max_order(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(max, 0);
    }

    #[tokio::test]
    async fn max_order_reflects_existing_lifts() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([(
                "num_items",
                Value::BigInt(Some(1)),
            )])]])
            .append_query_results([vec![BTreeMap::from([("max_order", Value::Int(Some(3)))])]])
            .into_connection();

        let store = StrengthLiftStore::new(db);
        let max = store
            .max_order(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(max, 3);
    }
}
