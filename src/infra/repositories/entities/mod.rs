//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod catalog_item;
pub mod metcon_movement;
pub mod metcon_workout;
pub mod strength_lift;
pub mod user;
pub mod workout_session;
