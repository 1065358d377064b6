//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models and the validation rules
//! that gate persistence, independent of infrastructure concerns.

pub mod catalog;
pub mod metcon;
pub mod password;
pub mod strength_lift;
pub mod user;
pub mod validation;
pub mod workout_session;

pub use catalog::{
    CatalogDeleteOutcome, CatalogItem, CatalogItemResponse, CatalogKind, NewCatalogItem,
    UpdateCatalogItem,
};
pub use metcon::{
    MetconMovement, MetconMovementResponse, MetconWorkout, MetconWorkoutDetail,
    MetconWorkoutResponse, NewMetconMovement, NewMetconWorkout, UpdateMetconWorkout,
};
pub use password::Password;
pub use strength_lift::{NewStrengthLift, StrengthLift, StrengthLiftResponse, UpdateStrengthLift};
pub use user::{User, UserResponse, UserRole};
pub use workout_session::{
    NewWorkoutSession, UpdateWorkoutSession, WorkoutSession, WorkoutSessionResponse,
};
