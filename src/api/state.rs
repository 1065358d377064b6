//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{AuthService, CatalogService, Services, UserService, WorkoutService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Workout service
    pub workout_service: Arc<dyn WorkoutService>,
    /// Catalog service
    pub catalog_service: Arc<dyn CatalogService>,
    /// In-process cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection, cache and config.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
    ) -> Self {
        use crate::services::ServiceContainer;

        let container = Services::from_connection(
            database.get_connection(),
            cache.as_ref().clone(),
            config,
        );

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            workout_service: container.workouts(),
            catalog_service: container.catalog(),
            cache,
            database,
        }
    }

    /// Create new application state with manually injected services
    /// (used by router tests).
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        workout_service: Arc<dyn WorkoutService>,
        catalog_service: Arc<dyn CatalogService>,
        cache: Arc<Cache>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            workout_service,
            catalog_service,
            cache,
            database,
        }
    }
}
