use actix_web::web;

use crate::ws::session::upgrade;

/// Path of the game websocket endpoint.
pub const GAME_SOCKET_PATH: &str = "/ws";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(GAME_SOCKET_PATH, web::get().to(upgrade));
}
