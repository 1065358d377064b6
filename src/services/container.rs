//! Service Container - Centralized service access.
//!
//! Handlers depend on this trait rather than on concrete services, which
//! keeps the router constructible over mocks in tests.

use std::sync::Arc;

use super::{AuthService, CatalogService, UserService, WorkoutService};
use crate::config::Config;
use crate::infra::{Cache, Persistence};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get workout service
    fn workouts(&self) -> Arc<dyn WorkoutService>;

    /// Get catalog service
    fn catalog(&self) -> Arc<dyn CatalogService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    workout_service: Arc<dyn WorkoutService>,
    catalog_service: Arc<dyn CatalogService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        workout_service: Arc<dyn WorkoutService>,
        catalog_service: Arc<dyn CatalogService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            workout_service,
            catalog_service,
        }
    }

    /// Create service container from database connection, cache and config
    pub fn from_connection(
        db: impl Into<std::sync::Arc<sea_orm::DatabaseConnection>>,
        cache: Cache,
        config: Config,
    ) -> Self {
        use super::{Authenticator, CatalogManager, UserManager, WorkoutManager};

        let uow = Arc::new(Persistence::new(db, cache.clone()));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let workout_service = Arc::new(WorkoutManager::new(uow.clone(), cache.clone()));
        let catalog_service = Arc::new(CatalogManager::new(uow, cache));

        Self {
            auth_service,
            user_service,
            workout_service,
            catalog_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn workouts(&self) -> Arc<dyn WorkoutService> {
        self.workout_service.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogService> {
        self.catalog_service.clone()
    }
}
