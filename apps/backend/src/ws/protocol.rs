use serde::{Deserialize, Serialize};

use crate::domain::RollOutcome;
use crate::error::AppError;
use crate::errors::ErrorCode as AppErrorCode;
use crate::services::{HoldToggled, LowerScored, UpperScored};

/// Player actions, one per text frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    RollDice,
    ToggleHoldDie { index: i64 },
    TakeUpperCategory { category: i64 },
    TakeLowerCategory { name: String },
}

/// Results pushed back to the acting connection only.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    ProcessRoll(RollOutcome),
    ToggleHoldDie(HoldToggled),
    SetUpper(UpperScored),
    SetLower(LowerScored),
    Error { code: ErrorCode, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    UnknownCategory,
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "bad_request",
            ErrorCode::UnknownCategory => "unknown_category",
            ErrorCode::Internal => "internal",
        }
    }
}

impl From<&AppError> for ErrorCode {
    fn from(err: &AppError) -> Self {
        match err.code() {
            AppErrorCode::UnknownCategory => ErrorCode::UnknownCategory,
            AppErrorCode::BadRequest | AppErrorCode::ValidationError => ErrorCode::BadRequest,
            _ => ErrorCode::Internal,
        }
    }
}
