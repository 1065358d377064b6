//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
mod catalog_service;
pub mod container;
mod user_service;
mod workout_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use catalog_service::{CatalogManager, CatalogService};
pub use user_service::{UpdateProfile, UserManager, UserService};
pub use workout_service::{WorkoutManager, WorkoutService};
