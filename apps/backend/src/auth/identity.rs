//! Optional player identity for websocket connections.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::warn;

use crate::auth::jwt::verify_access_token;
use crate::services::sessions::UserId;
use crate::state::app_state::AppState;
use crate::AppError;

/// The verified `sub` of the caller's access token, if any.
///
/// Tokens are read from `Authorization: Bearer <jwt>` first and then from the
/// `token` query parameter, since browsers cannot set headers on websocket
/// upgrades. A missing or unverifiable token yields an anonymous identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerIdentity(pub Option<UserId>);

impl PlayerIdentity {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref()
    }

    pub fn into_user_id(self) -> Option<UserId> {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token.to_string()),
        _ => None,
    }
}

fn query_token(req: &HttpRequest) -> Option<String> {
    web::Query::<std::collections::HashMap<String, String>>::from_query(req.query_string())
        .ok()?
        .into_inner()
        .remove("token")
        .filter(|token| !token.is_empty())
}

fn resolve(req: &HttpRequest) -> PlayerIdentity {
    let Some(token) = bearer_token(req).or_else(|| query_token(req)) else {
        return PlayerIdentity::anonymous();
    };
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        warn!("[AUTH] AppState missing; treating connection as anonymous");
        return PlayerIdentity::anonymous();
    };

    match verify_access_token(&token, &state.security) {
        Ok(claims) => PlayerIdentity(Some(UserId::new(claims.sub))),
        Err(err) => {
            warn!(code = %err.code(), "[AUTH] rejected access token; continuing anonymously");
            PlayerIdentity::anonymous()
        }
    }
}

impl FromRequest for PlayerIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(resolve(req)))
    }
}
