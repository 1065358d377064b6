//! Central access point for the persistence layer.
//!
//! Services depend on this trait rather than on concrete stores, which
//! keeps them constructible over mocks in tests. The user repository is
//! handed out already wrapped in its caching decorator.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::cache::Cache;
use super::repositories::{
    CachedUserStore, CatalogRepository, CatalogStore, LiftRepository, MetconRepository,
    MetconStore, SessionRepository, StrengthLiftStore, UserRepository, UserStore,
    WorkoutSessionStore,
};

/// Repository access for services.
pub trait UnitOfWork: Send + Sync {
    /// User repository (cache-decorated).
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Workout session repository.
    fn sessions(&self) -> Arc<dyn SessionRepository>;

    /// Strength lift repository.
    fn lifts(&self) -> Arc<dyn LiftRepository>;

    /// Metcon workout repository.
    fn metcons(&self) -> Arc<dyn MetconRepository>;

    /// Catalog repository.
    fn catalog(&self) -> Arc<dyn CatalogRepository>;
}

/// Concrete implementation of UnitOfWork over SeaORM stores.
pub struct Persistence {
    user_repo: Arc<CachedUserStore<UserStore>>,
    session_repo: Arc<WorkoutSessionStore>,
    lift_repo: Arc<StrengthLiftStore>,
    metcon_repo: Arc<MetconStore>,
    catalog_repo: Arc<CatalogStore>,
}

impl Persistence {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>, cache: Cache) -> Self {
        let db = db.into();
        Self {
            user_repo: Arc::new(CachedUserStore::new(UserStore::new(db.clone()), cache)),
            session_repo: Arc::new(WorkoutSessionStore::new(db.clone())),
            lift_repo: Arc::new(StrengthLiftStore::new(db.clone())),
            metcon_repo: Arc::new(MetconStore::new(db.clone())),
            catalog_repo: Arc::new(CatalogStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn sessions(&self) -> Arc<dyn SessionRepository> {
        self.session_repo.clone()
    }

    fn lifts(&self) -> Arc<dyn LiftRepository> {
        self.lift_repo.clone()
    }

    fn metcons(&self) -> Arc<dyn MetconRepository> {
        self.metcon_repo.clone()
    }

    fn catalog(&self) -> Arc<dyn CatalogRepository> {
        self.catalog_repo.clone()
    }
}
