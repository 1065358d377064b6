//! Metcon workout and movement domain entities.
//!
//! A metcon (metabolic conditioning) workout belongs to one session and
//! owns an ordered list of movements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{in_range, is_quarter_step_opt};
use crate::config::{MAX_ROUNDS, MIN_ROUNDS};
use crate::errors::{AppError, AppResult};

/// A logged metcon workout within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetconWorkout {
    pub id: Uuid,
    pub session_id: Uuid,
    pub metcon_type_id: Uuid,
    pub rounds: i32,
    pub time_cap_minutes: Option<f64>,
    pub actual_time_minutes: Option<f64>,
    pub rest_between_rounds: Option<f64>,
    pub comments: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MetconWorkout {
    pub fn is_valid_rounds(&self) -> bool {
        in_range(self.rounds, MIN_ROUNDS, MAX_ROUNDS)
    }

    pub fn is_valid_time_cap_minutes(&self) -> bool {
        is_quarter_step_opt(self.time_cap_minutes)
    }

    pub fn is_valid_actual_time_minutes(&self) -> bool {
        is_quarter_step_opt(self.actual_time_minutes)
    }

    pub fn is_valid_rest_between_rounds(&self) -> bool {
        is_quarter_step_opt(self.rest_between_rounds)
    }

    /// Run all metcon validators, failing fast with a field-naming message.
    pub fn validate(&self) -> AppResult<()> {
        if !self.is_valid_rounds() {
            return Err(AppError::validation(format!(
                "rounds must be between {} and {}",
                MIN_ROUNDS, MAX_ROUNDS
            )));
        }
        if !self.is_valid_time_cap_minutes() {
            return Err(AppError::validation(
                "time_cap_minutes must be a non-negative multiple of 0.25",
            ));
        }
        if !self.is_valid_actual_time_minutes() {
            return Err(AppError::validation(
                "actual_time_minutes must be a non-negative multiple of 0.25",
            ));
        }
        if !self.is_valid_rest_between_rounds() {
            return Err(AppError::validation(
                "rest_between_rounds must be a non-negative multiple of 0.25",
            ));
        }
        Ok(())
    }
}

/// A single movement inside a metcon workout.
///
/// `order` is scoped to the parent workout and assigned 1..n from the
/// payload order at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetconMovement {
    pub id: Uuid,
    pub metcon_workout_id: Uuid,
    pub movement_type_id: Uuid,
    pub reps: Option<i32>,
    pub distance_meters: Option<f64>,
    pub weight: Option<f64>,
    pub order: i32,
}

impl MetconMovement {
    pub fn is_valid_weight(&self) -> bool {
        is_quarter_step_opt(self.weight)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.reps.is_none() && self.distance_meters.is_none() {
            return Err(AppError::validation(
                "movement requires reps or distance_meters",
            ));
        }
        if let Some(reps) = self.reps {
            if reps < 1 {
                return Err(AppError::validation("movement reps must be positive"));
            }
        }
        if !self.is_valid_weight() {
            return Err(AppError::validation(
                "movement weight must be a non-negative multiple of 0.25",
            ));
        }
        Ok(())
    }
}

/// A metcon workout together with its movements, as read back from the
/// repository.
#[derive(Debug, Clone)]
pub struct MetconWorkoutDetail {
    pub workout: MetconWorkout,
    pub movements: Vec<MetconMovement>,
}

/// Movement payload inside metcon create/update requests
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewMetconMovement {
    pub movement_type_id: Uuid,
    #[schema(example = 21)]
    pub reps: Option<i32>,
    pub distance_meters: Option<f64>,
    pub weight: Option<f64>,
}

/// Metcon creation input
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewMetconWorkout {
    pub metcon_type_id: Uuid,
    #[schema(example = 3)]
    pub rounds: i32,
    pub time_cap_minutes: Option<f64>,
    pub actual_time_minutes: Option<f64>,
    pub rest_between_rounds: Option<f64>,
    pub comments: Option<String>,
    /// Explicit display order; assigned automatically when omitted or zero
    pub order: Option<i32>,
    #[serde(default)]
    pub movements: Vec<NewMetconMovement>,
}

/// Metcon update input; `None` fields are left unchanged, and a present
/// `movements` list replaces the whole set.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateMetconWorkout {
    pub metcon_type_id: Option<Uuid>,
    pub rounds: Option<i32>,
    pub time_cap_minutes: Option<f64>,
    pub actual_time_minutes: Option<f64>,
    pub rest_between_rounds: Option<f64>,
    pub comments: Option<String>,
    pub order: Option<i32>,
    pub movements: Option<Vec<NewMetconMovement>>,
}

/// Movement response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetconMovementResponse {
    pub id: Uuid,
    pub movement_type_id: Uuid,
    pub reps: Option<i32>,
    pub distance_meters: Option<f64>,
    pub weight: Option<f64>,
    pub order: i32,
}

impl From<MetconMovement> for MetconMovementResponse {
    fn from(movement: MetconMovement) -> Self {
        Self {
            id: movement.id,
            movement_type_id: movement.movement_type_id,
            reps: movement.reps,
            distance_meters: movement.distance_meters,
            weight: movement.weight,
            order: movement.order,
        }
    }
}

/// Metcon response with embedded movements
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetconWorkoutResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub metcon_type_id: Uuid,
    pub rounds: i32,
    pub time_cap_minutes: Option<f64>,
    pub actual_time_minutes: Option<f64>,
    pub rest_between_rounds: Option<f64>,
    pub comments: Option<String>,
    pub order: i32,
    pub movements: Vec<MetconMovementResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MetconWorkoutDetail> for MetconWorkoutResponse {
    fn from(detail: MetconWorkoutDetail) -> Self {
        let workout = detail.workout;
        Self {
            id: workout.id,
            session_id: workout.session_id,
            metcon_type_id: workout.metcon_type_id,
            rounds: workout.rounds,
            time_cap_minutes: workout.time_cap_minutes,
            actual_time_minutes: workout.actual_time_minutes,
            rest_between_rounds: workout.rest_between_rounds,
            comments: workout.comments,
            order: workout.order,
            movements: detail
                .movements
                .into_iter()
                .map(MetconMovementResponse::from)
                .collect(),
            created_at: workout.created_at,
            updated_at: workout.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_metcon() -> MetconWorkout {
        MetconWorkout {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            metcon_type_id: Uuid::new_v4(),
            rounds: 5,
            time_cap_minutes: Some(20.0),
            actual_time_minutes: Some(17.75),
            rest_between_rounds: None,
            comments: None,
            order: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_metcon_passes() {
        assert!(base_metcon().validate().is_ok());
    }

    #[test]
    fn rounds_range_boundaries() {
        let mut metcon = base_metcon();
        for valid in [1, 50, 100] {
            metcon.rounds = valid;
            assert!(metcon.is_valid_rounds());
        }
        for invalid in [0, 101] {
            metcon.rounds = invalid;
            assert!(!metcon.is_valid_rounds());
        }
    }

    #[test]
    fn off_grid_time_cap_fails() {
        let mut metcon = base_metcon();
        metcon.time_cap_minutes = Some(20.1);
        assert!(!metcon.is_valid_time_cap_minutes());

        let err = metcon.validate().unwrap_err();
        assert!(err.to_string().contains("time_cap_minutes"));
    }

    #[test]
    fn movement_requires_a_measurement() {
        let movement = MetconMovement {
            id: Uuid::new_v4(),
            metcon_workout_id: Uuid::new_v4(),
            movement_type_id: Uuid::new_v4(),
            reps: None,
            distance_meters: None,
            weight: None,
            order: 1,
        };
        assert!(movement.validate().is_err());

        let with_reps = MetconMovement {
            reps: Some(21),
            ..movement.clone()
        };
        assert!(with_reps.validate().is_ok());

        let with_distance = MetconMovement {
            distance_meters: Some(400.0),
            ..movement
        };
        assert!(with_distance.validate().is_ok());
    }

    #[test]
    fn movement_weight_quarter_step() {
        let movement = MetconMovement {
            id: Uuid::new_v4(),
            metcon_workout_id: Uuid::new_v4(),
            movement_type_id: Uuid::new_v4(),
            reps: Some(15),
            distance_meters: None,
            weight: Some(52.6),
            order: 1,
        };
        assert!(!movement.is_valid_weight());
        assert!(movement.validate().is_err());
    }
}
