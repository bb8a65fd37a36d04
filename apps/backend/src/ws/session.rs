use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};

use crate::auth::identity::PlayerIdentity;
use crate::error::AppError;
use crate::services::{ConnectionId, GameEngine, UserId};
use crate::state::app_state::AppState;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    identity: PlayerIdentity,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(
        ConnectionId::new(),
        identity.into_user_id(),
        app_state.engine.clone(),
    );
    ws::start(session, &req, stream)
}

/// One websocket connection driving one game session.
///
/// Frames are handled one at a time by the actor, so a connection's actions
/// never race each other.
pub struct WsSession {
    conn_id: ConnectionId,
    user_id: Option<UserId>,
    engine: Arc<GameEngine>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: ConnectionId, user_id: Option<UserId>, engine: Arc<GameEngine>) -> Self {
        Self {
            conn_id,
            user_id,
            engine,
            last_heartbeat: Instant::now(),
        }
    }

    fn user(&self) -> Option<&str> {
        self.user_id.as_ref().map(UserId::as_str)
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(&self, ctx: &mut ws::WebsocketContext<Self>, err: &AppError) {
        let code = ErrorCode::from(err);
        debug!(
            conn_id = %self.conn_id,
            code = code.as_str(),
            detail = %err.detail(),
            "[WS SESSION] rejected action"
        );
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: err.detail(),
            },
        );
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code,
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    user_id = actor.user(),
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn dispatch(&self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let reply = match cmd {
            ClientMsg::RollDice => Ok(self.engine.roll_dice(self.conn_id).map(ServerMsg::ProcessRoll)),
            ClientMsg::ToggleHoldDie { index } => Ok(self
                .engine
                .toggle_hold_die(self.conn_id, index)
                .map(ServerMsg::ToggleHoldDie)),
            ClientMsg::TakeUpperCategory { category } => Ok(self
                .engine
                .take_upper_category(self.conn_id, category)
                .map(ServerMsg::SetUpper)),
            ClientMsg::TakeLowerCategory { name } => self
                .engine
                .take_lower_category(self.conn_id, &name)
                .map(|scored| scored.map(ServerMsg::SetLower)),
        };

        match reply {
            Ok(Some(msg)) => Self::send_json(ctx, &msg),
            Ok(None) => {}
            Err(err) => self.send_error(ctx, &AppError::from(err)),
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.engine.on_connect(self.conn_id, self.user_id.clone());
        info!(
            conn_id = %self.conn_id,
            user_id = self.user(),
            "[WS SESSION] started"
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.engine.on_disconnect(self.conn_id);
        info!(
            conn_id = %self.conn_id,
            user_id = self.user(),
            "[WS SESSION] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(cmd) = parsed else {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    return;
                };
                self.dispatch(cmd, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    user_id = self.user(),
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
