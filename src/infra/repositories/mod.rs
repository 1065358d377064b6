//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
mod cached_user_repository;
mod catalog_repository;
pub(crate) mod entities;
mod lift_repository;
mod metcon_repository;
mod session_repository;
mod user_repository;

pub use cached_user_repository::CachedUserStore;
pub use catalog_repository::{CatalogRepository, CatalogStore};
pub use lift_repository::{LiftRepository, StrengthLiftStore};
pub use metcon_repository::{MetconRepository, MetconStore};
pub use session_repository::{SessionFilter, SessionRepository, WorkoutSessionStore};
pub use user_repository::{UserChanges, UserRepository, UserStore};

// Mocks generated for unit tests inside the crate
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use lift_repository::MockLiftRepository;
#[cfg(test)]
pub use metcon_repository::MockMetconRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
