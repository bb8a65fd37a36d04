use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::web::Data;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::routes::realtime::GAME_SOCKET_PATH;
use crate::state::app_state::AppState;

/// What a finished request was, for the purpose of logging it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Handshake accepted; the game session lives on in the websocket actor.
    SocketOpened,
    /// A request on the game socket path that did not upgrade.
    SocketRejected,
    Completed,
}

impl RequestOutcome {
    pub fn classify(path: &str, status: StatusCode) -> Self {
        if status == StatusCode::SWITCHING_PROTOCOLS {
            Self::SocketOpened
        } else if path == GAME_SOCKET_PATH {
            Self::SocketRejected
        } else {
            Self::Completed
        }
    }
}

/// Request logging for the game backend.
///
/// Plain HTTP requests get one `request_completed` event levelled by status
/// class. Game socket handshakes are logged as `game_socket_opened` or
/// `game_socket_rejected` with the number of live sessions, since the socket
/// outlives the request and its duration covers the handshake only.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let state = req.app_data::<Data<AppState>>().cloned();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let status_code = status.as_u16();
            let duration_us = start.elapsed().as_micros() as u64;
            // Counted after the handshake, so an opened socket already has its session.
            let sessions = state.map(|s| s.engine.session_count());

            match RequestOutcome::classify(&path, status) {
                RequestOutcome::SocketOpened => {
                    info!(url.path = %path, handshake_us = duration_us, sessions, "game_socket_opened");
                }
                RequestOutcome::SocketRejected => {
                    warn!(http.method = %method, http.status_code = status_code, sessions, "game_socket_rejected");
                }
                RequestOutcome::Completed if status.is_server_error() => {
                    error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                }
                RequestOutcome::Completed if status.is_client_error() => {
                    warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                }
                RequestOutcome::Completed => {
                    info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, "request_completed");
                }
            }

            result
        })
    }
}
