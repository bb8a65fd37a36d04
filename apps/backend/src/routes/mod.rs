use actix_web::web;

pub mod health;
pub mod realtime;

/// Register every HTTP and websocket route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.configure(health::configure_routes);

    // Game websocket: /ws
    cfg.configure(realtime::configure_routes);
}
