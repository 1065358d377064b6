//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - In-process caching
//! - Unit of Work for repository wiring

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    CachedUserStore, CatalogRepository, LiftRepository, MetconRepository, SessionFilter,
    SessionRepository, UserChanges, UserRepository,
};
pub use unit_of_work::{Persistence, UnitOfWork};
