//! Workout session domain entity.
//!
//! A session is the per-day container that strength lifts and metcon
//! workouts hang off. Every child read or write is scoped through the
//! owning session's `user_id`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Workout session domain entity.
///
/// Invariants: the date is never in the future, and a user has at most
/// one session per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkoutSession {
    /// True iff the session date is today or in the past.
    pub fn is_valid_date(&self) -> bool {
        Self::date_not_in_future(self.date)
    }

    /// Date check shared with pre-construction validation.
    pub fn date_not_in_future(date: NaiveDate) -> bool {
        date <= Utc::now().date_naive()
    }

    /// Run all session validators, mapping the first failure to a
    /// field-naming validation error.
    pub fn validate(&self) -> AppResult<()> {
        if !self.is_valid_date() {
            return Err(AppError::validation("date must not be in the future"));
        }
        Ok(())
    }
}

/// Session creation input
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewWorkoutSession {
    /// Calendar date of the session (today or earlier)
    #[schema(example = "2026-08-29")]
    pub date: NaiveDate,
    /// Optional free-text notes
    #[schema(example = "Felt strong, PR attempt next week")]
    pub notes: Option<String>,
}

/// Session update input; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateWorkoutSession {
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Session response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkoutSessionResponse {
    pub id: Uuid,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WorkoutSession> for WorkoutSessionResponse {
    fn from(session: WorkoutSession) -> Self {
        Self {
            id: session.id,
            date: session.date,
            notes: session.notes,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session_on(date: NaiveDate) -> WorkoutSession {
        WorkoutSession {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn today_and_past_dates_are_valid() {
        let today = Utc::now().date_naive();
        assert!(session_on(today).is_valid_date());
        assert!(session_on(today - Duration::days(30)).is_valid_date());
    }

    #[test]
    fn tomorrow_is_invalid() {
        let tomorrow = Utc::now().date_naive() + Duration::days(1);
        let session = session_on(tomorrow);
        assert!(!session.is_valid_date());

        let err = session.validate().unwrap_err();
        assert!(err.to_string().contains("date"));
    }
}
