//! Metcon workout repository.
//!
//! A metcon and its movements are written together: movement payloads are
//! validated up front, numbered 1..n in payload order, and an update that
//! carries a movement list replaces the whole set.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use uuid::Uuid;

use super::base::{ensure_catalog_ref, max_child_order, resolve_order};
use super::entities::metcon_movement::{self, Entity as MovementEntity};
use super::entities::metcon_workout::{self, Entity as MetconEntity};
use super::entities::workout_session;
use crate::domain::{
    CatalogKind, MetconMovement, MetconWorkout, MetconWorkoutDetail, NewMetconMovement,
    NewMetconWorkout, UpdateMetconWorkout,
};
use crate::errors::{AppError, AppResult, OptionExt};

/// Metcon workout data access operations, scoped to an owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetconRepository: Send + Sync {
    /// Create a metcon with its movements under one of the user's
    /// sessions.
    async fn create(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: NewMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail>;

    /// Find the user's metcon by id, movements included.
    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<MetconWorkoutDetail>>;

    /// List all metcons of one owned session in display order.
    async fn list_for_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> AppResult<Vec<MetconWorkoutDetail>>;

    /// Update the user's metcon. A present movement list replaces the
    /// existing movements wholesale.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail>;

    /// Delete the user's metcon and its movements. Returns `false` when
    /// no owned row matched.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool>;

    /// Highest display order among the session's metcons, 0 when it has
    /// none. Exposed for callers that pre-compute an order value.
    async fn max_order(&self, user_id: Uuid, session_id: Uuid) -> AppResult<i32>;
}

/// SeaORM-backed metcon store.
pub struct MetconStore {
    db: Arc<DatabaseConnection>,
}

impl MetconStore {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self { db: db.into() }
    }

    async fn find_owned(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<metcon_workout::Model>> {
        MetconEntity::find()
            .filter(metcon_workout::Column::Id.eq(id))
            .join(JoinType::InnerJoin, metcon_workout::Relation::Session.def())
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

    async fn load_movements(&self, metcon_id: Uuid) -> AppResult<Vec<MetconMovement>> {
        let models = MovementEntity::find()
            .filter(metcon_movement::Column::MetconWorkoutId.eq(metcon_id))
            .order_by_asc(metcon_movement::Column::SortOrder)
            .all(self.db.as_ref())
            .await?;
        Ok(models.into_iter().map(MetconMovement::from).collect())
    }

    /// Validate movement payloads and turn them into numbered domain
    /// values under the given metcon, checking each catalog reference.
    async fn prepare_movements(
        &self,
        metcon_id: Uuid,
        inputs: Vec<NewMetconMovement>,
    ) -> AppResult<Vec<MetconMovement>> {
        let mut movements = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.into_iter().enumerate() {
            ensure_catalog_ref(self.db.as_ref(), input.movement_type_id, CatalogKind::Movement).await?;

            let movement = MetconMovement {
                id: Uuid::new_v4(),
                metcon_workout_id: metcon_id,
                movement_type_id: input.movement_type_id,
                reps: input.reps,
                distance_meters: input.distance_meters,
                weight: input.weight,
                order: index as i32 + 1,
            };
            movement.validate()?;
            movements.push(movement);
        }
        Ok(movements)
    }

    async fn insert_movements(&self, movements: &[MetconMovement]) -> AppResult<()> {
        if movements.is_empty() {
            return Ok(());
        }

        let active_models: Vec<metcon_movement::ActiveModel> = movements
            .iter()
            .map(|m| metcon_movement::ActiveModel {
                id: Set(m.id),
                metcon_workout_id: Set(m.metcon_workout_id),
                movement_type_id: Set(m.movement_type_id),
                reps: Set(m.reps),
                distance_meters: Set(m.distance_meters),
                weight: Set(m.weight),
                sort_order: Set(m.order),
            })
            .collect();

        MovementEntity::insert_many(active_models)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MetconRepository for MetconStore {
    async fn create(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        input: NewMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail> {
        if !self.session_owned(user_id, session_id).await? {
            return Err(AppError::NotFound);
        }
        ensure_catalog_ref(self.db.as_ref(), input.metcon_type_id, CatalogKind::Metcon).await?;

        let max_order = max_child_order::<MetconEntity>(
            self.db.as_ref(),
            metcon_workout::Column::SessionId,
            session_id,
            metcon_workout::Column::SortOrder,
        )
        .await?;

        let now = Utc::now();
        let workout = MetconWorkout {
            id: Uuid::new_v4(),
            session_id,
            metcon_type_id: input.metcon_type_id,
            rounds: input.rounds,
            time_cap_minutes: input.time_cap_minutes,
            actual_time_minutes: input.actual_time_minutes,
            rest_between_rounds: input.rest_between_rounds,
            comments: input.comments,
            order: resolve_order(input.order, max_order),
            created_at: now,
            updated_at: now,
        };
        workout.validate()?;

        let movements = self.prepare_movements(workout.id, input.movements).await?;

        let active_model = metcon_workout::ActiveModel {
            id: Set(workout.id),
            session_id: Set(workout.session_id),
            metcon_type_id: Set(workout.metcon_type_id),
            rounds: Set(workout.rounds),
            time_cap_minutes: Set(workout.time_cap_minutes),
            actual_time_minutes: Set(workout.actual_time_minutes),
            rest_between_rounds: Set(workout.rest_between_rounds),
            comments: Set(workout.comments.clone()),
            sort_order: Set(workout.order),
            created_at: Set(workout.created_at),
            updated_at: Set(workout.updated_at),
        };
        let model = active_model.insert(self.db.as_ref()).await?;
        self.insert_movements(&movements).await?;

        Ok(MetconWorkoutDetail {
            workout: MetconWorkout::from(model),
            movements,
        })
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> AppResult<Option<MetconWorkoutDetail>> {
        let Some(model) = self.find_owned(user_id, id).await? else {
            return Ok(None);
        };

        let movements = self.load_movements(model.id).await?;
        Ok(Some(MetconWorkoutDetail {
            workout: MetconWorkout::from(model),
            movements,
        }))
    }

    async fn list_for_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> AppResult<Vec<MetconWorkoutDetail>> {
        if !self.session_owned(user_id, session_id).await? {
            return Err(AppError::NotFound);
        }

        let models = MetconEntity::find()
            .filter(metcon_workout::Column::SessionId.eq(session_id))
            .order_by_asc(metcon_workout::Column::SortOrder)
            .order_by_asc(metcon_workout::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;

        let mut details = Vec::with_capacity(models.len());
        for model in models {
            let movements = self.load_movements(model.id).await?;
            details.push(MetconWorkoutDetail {
                workout: MetconWorkout::from(model),
                movements,
            });
        }
        Ok(details)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        mut input: UpdateMetconWorkout,
    ) -> AppResult<MetconWorkoutDetail> {
        let model = self.find_owned(user_id, id).await?.ok_or_not_found()?;

        if let Some(metcon_type_id) = input.metcon_type_id {
            ensure_catalog_ref(self.db.as_ref(), metcon_type_id, CatalogKind::Metcon).await?;
        }

        // An order request resolves against the session max, so fetch it
        // only when one is present
        let max_order = match input.order {
            Some(_) => {
                max_child_order::<MetconEntity>(
                    self.db.as_ref(),
                    metcon_workout::Column::SessionId,
                    model.session_id,
                    metcon_workout::Column::SortOrder,
                )
                .await?
            }
            None => 0,
        };

        let movement_inputs = input.movements.take();
        let workout = apply_changes(MetconWorkout::from(model.clone()), input, max_order);
        workout.validate()?;

        // Prepare the replacement movement set before touching any row
        let replacement = match movement_inputs {
            Some(inputs) => Some(self.prepare_movements(id, inputs).await?),
            None => None,
        };

        let mut active: metcon_workout::ActiveModel = model.into();
        active.metcon_type_id = Set(workout.metcon_type_id);
        active.rounds = Set(workout.rounds);
        active.time_cap_minutes = Set(workout.time_cap_minutes);
        active.actual_time_minutes = Set(workout.actual_time_minutes);
        active.rest_between_rounds = Set(workout.rest_between_rounds);
        active.comments = Set(workout.comments.clone());
        active.sort_order = Set(workout.order);
        active.updated_at = Set(workout.updated_at);

        let model = active.update(self.db.as_ref()).await?;

        let movements = match replacement {
            Some(movements) => {
                MovementEntity::delete_many()
                    .filter(metcon_movement::Column::MetconWorkoutId.eq(id))
                    .exec(self.db.as_ref())
                    .await?;
                self.insert_movements(&movements).await?;
                movements
            }
            None => self.load_movements(id).await?,
        };

        Ok(MetconWorkoutDetail {
            workout: MetconWorkout::from(model),
            movements,
        })
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> AppResult<bool> {
        let Some(model) = self.find_owned(user_id, id).await? else {
            return Ok(false);
        };

        let result = MetconEntity::delete_by_id(model.id).exec(self.db.as_ref()).await?;
        Ok(result.rows_affected > 0)
    }

    async fn max_order(&self, user_id: Uuid, session_id: Uuid) -> AppResult<i32> {
        if !self.session_owned(user_id, session_id).await? {
            return Err(AppError::NotFound);
        }

        max_child_order::<MetconEntity>(
            self.db.as_ref(),
            metcon_workout::Column::SessionId,
            session_id,
            metcon_workout::Column::SortOrder,
        )
        .await
    }
}

/// Merge update fields into the domain value. `None` fields are left
/// unchanged; an order request goes through [`resolve_order`] against the
/// session max, so a non-positive value appends just like create. The
/// movement list is handled separately by the caller.
fn apply_changes(
    mut workout: MetconWorkout,
    input: UpdateMetconWorkout,
    max_order: i32,
) -> MetconWorkout {
    if let Some(metcon_type_id) = input.metcon_type_id {
        workout.metcon_type_id = metcon_type_id;
    }
    if let Some(rounds) = input.rounds {
        workout.rounds = rounds;
    }
    if let Some(time_cap_minutes) = input.time_cap_minutes {
        workout.time_cap_minutes = Some(time_cap_minutes);
    }
    if let Some(actual_time_minutes) = input.actual_time_minutes {
        workout.actual_time_minutes = Some(actual_time_minutes);
    }
    if let Some(rest_between_rounds) = input.rest_between_rounds {
        workout.rest_between_rounds = Some(rest_between_rounds);
    }
    if let Some(comments) = input.comments {
        workout.comments = Some(comments);
    }
    if let Some(requested) = input.order {
        workout.order = resolve_order(Some(requested), max_order);
    }
    workout.updated_at = Utc::now();
    workout
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_metcon() -> MetconWorkout {
        MetconWorkout {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            metcon_type_id: Uuid::new_v4(),
            rounds: 3,
            time_cap_minutes: None,
            actual_time_minutes: None,
            rest_between_rounds: None,
            comments: None,
            order: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn update_keeps_positive_requested_order() {
        let input = UpdateMetconWorkout {
            order: Some(4),
            ..Default::default()
        };
        assert_eq!(apply_changes(base_metcon(), input, 2).order, 4);
    }

    #[test]
    fn update_appends_non_positive_requested_order() {
        let input = UpdateMetconWorkout {
            order: Some(0),
            ..Default::default()
        };
        assert_eq!(apply_changes(base_metcon(), input, 2).order, 3);
    }

    #[test]
    fn update_without_order_leaves_it_unchanged() {
        let input = UpdateMetconWorkout {
            rounds: Some(5),
            ..Default::default()
        };
        let workout = apply_changes(base_metcon(), input, 8);
        assert_eq!(workout.order, 1);
        assert_eq!(workout.rounds, 5);
    }
}
