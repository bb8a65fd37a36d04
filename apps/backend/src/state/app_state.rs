use std::fmt;
use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::services::GameEngine;

/// Application state shared by every worker.
#[derive(Clone)]
pub struct AppState {
    /// Live game sessions, one per websocket connection
    pub engine: Arc<GameEngine>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(engine: Arc<GameEngine>, security: SecurityConfig) -> Self {
        Self { engine, security }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("sessions", &self.engine.session_count())
            .field("security", &self.security)
            .finish()
    }
}
