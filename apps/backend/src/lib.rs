#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod errors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod ws;


// Re-exports for public API
pub use auth::identity::PlayerIdentity;
pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use config::db::db_url;
pub use config::server::ServerConfig;
pub use error::AppError;
pub use infra::db::connect_db;
pub use middleware::structured_logger::StructuredLogger;
pub use services::GameEngine;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
