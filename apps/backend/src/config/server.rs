use std::env;

use crate::error::AppError;

/// Process-level settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Base seed for dice RNGs. Unset means OS entropy.
    pub dice_seed: Option<u64>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match lookup("BACKEND_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config("BACKEND_PORT must be a valid port number"))?,
            None => 3001,
        };
        let jwt_secret = lookup("BACKEND_JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set"))?;
        let dice_seed = lookup("YAHTZEE_DICE_SEED")
            .map(|raw| {
                raw.parse::<u64>()
                    .map_err(|_| AppError::config("YAHTZEE_DICE_SEED must be an unsigned integer"))
            })
            .transpose()?;

        Ok(Self {
            host,
            port,
            jwt_secret,
            dice_seed,
        })
    }
}
