//! Strength lift domain entity and validators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{in_range, is_quarter_step, is_quarter_step_opt};
use crate::config::{MAX_REPS, MAX_SETS, MIN_REPS, MIN_SETS};
use crate::errors::{AppError, AppResult};

/// A logged strength lift within a workout session.
///
/// `order` is session-scoped and preserves display order; it is assigned
/// as max-order-plus-one at creation when the caller leaves it unset.
/// Deleting a lift does not renumber its siblings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthLift {
    pub id: Uuid,
    pub session_id: Uuid,
    pub exercise_type_id: Uuid,
    /// Set/rep structure descriptor, e.g. "5x5" or "531"
    pub scheme: Option<String>,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub additional_weight: Option<f64>,
    /// Duration in minutes (timed holds, carries)
    pub duration: Option<f64>,
    /// Rest between sets in minutes
    pub rest_period: Option<f64>,
    pub comments: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StrengthLift {
    pub fn is_valid_weight(&self) -> bool {
        is_quarter_step(self.weight)
    }

    pub fn is_valid_additional_weight(&self) -> bool {
        is_quarter_step_opt(self.additional_weight)
    }

    pub fn is_valid_duration(&self) -> bool {
        is_quarter_step_opt(self.duration)
    }

    pub fn is_valid_rest_period(&self) -> bool {
        is_quarter_step_opt(self.rest_period)
    }

    pub fn is_valid_sets(&self) -> bool {
        in_range(self.sets, MIN_SETS, MAX_SETS)
    }

    pub fn is_valid_reps(&self) -> bool {
        in_range(self.reps, MIN_REPS, MAX_REPS)
    }

    /// Run all lift validators, failing fast with a field-naming message.
    ///
    /// Repositories call this before any create or update commit; a
    /// failure aborts the write with no partial mutation.
    pub fn validate(&self) -> AppResult<()> {
        if !self.is_valid_sets() {
            return Err(AppError::validation(format!(
                "sets must be between {} and {}",
                MIN_SETS, MAX_SETS
            )));
        }
        if !self.is_valid_reps() {
            return Err(AppError::validation(format!(
                "reps must be between {} and {}",
                MIN_REPS, MAX_REPS
            )));
        }
        if !self.is_valid_weight() {
            return Err(AppError::validation(
                "weight must be a non-negative multiple of 0.25",
            ));
        }
        if !self.is_valid_additional_weight() {
            return Err(AppError::validation(
                "additional_weight must be a non-negative multiple of 0.25",
            ));
        }
        if !self.is_valid_duration() {
            return Err(AppError::validation(
                "duration must be a non-negative multiple of 0.25",
            ));
        }
        if !self.is_valid_rest_period() {
            return Err(AppError::validation(
                "rest_period must be a non-negative multiple of 0.25",
            ));
        }
        Ok(())
    }
}

/// Lift creation input
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewStrengthLift {
    pub exercise_type_id: Uuid,
    #[schema(example = "5x5")]
    pub scheme: Option<String>,
    #[schema(example = 5)]
    pub sets: i32,
    #[schema(example = 5)]
    pub reps: i32,
    #[schema(example = 135.25)]
    pub weight: f64,
    pub additional_weight: Option<f64>,
    pub duration: Option<f64>,
    pub rest_period: Option<f64>,
    pub comments: Option<String>,
    /// Explicit display order; assigned automatically when omitted or zero
    pub order: Option<i32>,
}

/// Lift update input; `None` fields are left unchanged. The owning
/// session is immutable after creation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateStrengthLift {
    pub exercise_type_id: Option<Uuid>,
    pub scheme: Option<String>,
    pub sets: Option<i32>,
    pub reps: Option<i32>,
    pub weight: Option<f64>,
    pub additional_weight: Option<f64>,
    pub duration: Option<f64>,
    pub rest_period: Option<f64>,
    pub comments: Option<String>,
    pub order: Option<i32>,
}

/// Lift response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StrengthLiftResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub exercise_type_id: Uuid,
    pub scheme: Option<String>,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub additional_weight: Option<f64>,
    pub duration: Option<f64>,
    pub rest_period: Option<f64>,
    pub comments: Option<String>,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StrengthLift> for StrengthLiftResponse {
    fn from(lift: StrengthLift) -> Self {
        Self {
            id: lift.id,
            session_id: lift.session_id,
            exercise_type_id: lift.exercise_type_id,
            scheme: lift.scheme,
            sets: lift.sets,
            reps: lift.reps,
            weight: lift.weight,
            additional_weight: lift.additional_weight,
            duration: lift.duration,
            rest_period: lift.rest_period,
            comments: lift.comments,
            order: lift.order,
            created_at: lift.created_at,
            updated_at: lift.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_lift() -> StrengthLift {
        StrengthLift {
            id: Uuid::new_v4(),
            session_id: Uuid::new_v4(),
            exercise_type_id: Uuid::new_v4(),
            scheme: Some("5x5".to_string()),
            sets: 5,
            reps: 5,
            weight: 135.25,
            additional_weight: None,
            duration: None,
            rest_period: None,
            comments: None,
            order: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn valid_lift_passes() {
        assert!(base_lift().validate().is_ok());
    }

    #[test]
    fn off_grid_weight_fails_naming_the_field() {
        let mut lift = base_lift();
        lift.weight = 135.3;
        assert!(!lift.is_valid_weight());

        let err = lift.validate().unwrap_err();
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn sets_range_boundaries() {
        let mut lift = base_lift();
        for valid in [1, 25, 50] {
            lift.sets = valid;
            assert!(lift.is_valid_sets());
        }
        for invalid in [0, 51] {
            lift.sets = invalid;
            assert!(!lift.is_valid_sets());
        }
    }

    #[test]
    fn reps_range_boundaries() {
        let mut lift = base_lift();
        for valid in [1, 250, 500] {
            lift.reps = valid;
            assert!(lift.is_valid_reps());
        }
        for invalid in [0, 501] {
            lift.reps = invalid;
            assert!(!lift.is_valid_reps());
        }
    }

    #[test]
    fn optional_fields_pass_when_none() {
        let lift = base_lift();
        assert!(lift.is_valid_additional_weight());
        assert!(lift.is_valid_duration());
        assert!(lift.is_valid_rest_period());
    }

    #[test]
    fn optional_fields_checked_when_present() {
        let mut lift = base_lift();
        lift.additional_weight = Some(25.3);
        assert!(!lift.is_valid_additional_weight());
        let err = lift.validate().unwrap_err();
        assert!(err.to_string().contains("additional_weight"));

        lift.additional_weight = Some(25.5);
        lift.rest_period = Some(2.25);
        assert!(lift.validate().is_ok());
    }
}
