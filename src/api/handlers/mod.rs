//! HTTP request handlers.

pub mod auth_handler;
pub mod catalog_handler;
pub mod lift_handler;
pub mod metcon_handler;
pub mod session_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use catalog_handler::catalog_routes;
pub use lift_handler::{lift_routes, session_lift_routes};
pub use metcon_handler::{metcon_routes, session_metcon_routes};
pub use session_handler::session_routes;
pub use user_handler::user_routes;
