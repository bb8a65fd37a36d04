//! Completed-game statistics hand-off.
//!
//! The engine submits one `CompletedGame` per session when its score sheet is
//! first complete. Sinks are fire-and-forget: they never block the caller and
//! report their own failures through tracing.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, error, info};

use crate::repos::game_statistics::{self, GameStatisticCreate};
use crate::services::sessions::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedGame {
    pub user_id: Option<UserId>,
    pub final_score: u32,
    pub game_completed: bool,
    pub game_start_time: OffsetDateTime,
    pub game_end_time: OffsetDateTime,
}

pub trait StatisticsSink: Send + Sync {
    /// Hand off a finished game. Must return promptly and never fail the caller.
    fn submit(&self, record: CompletedGame);
}

/// Sink used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogStatisticsSink;

impl StatisticsSink for LogStatisticsSink {
    fn submit(&self, record: CompletedGame) {
        info!(
            user_id = record.user_id.as_ref().map(UserId::as_str),
            final_score = record.final_score,
            game_completed = record.game_completed,
            "[STATS] game finished (not persisted)"
        );
    }
}

/// Writes statistics for signed-in players to the `game_statistics` table.
///
/// Anonymous games are skipped. Writes run on a spawned task; errors are logged
/// and dropped.
#[derive(Debug, Clone)]
pub struct DbStatisticsSink {
    db: DatabaseConnection,
}

impl DbStatisticsSink {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl StatisticsSink for DbStatisticsSink {
    fn submit(&self, record: CompletedGame) {
        let Some(user_id) = record.user_id else {
            debug!(
                final_score = record.final_score,
                "[STATS] anonymous game, skipping persistence"
            );
            return;
        };

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                error!(error = %err, user_id = %user_id, "[STATS] no runtime to persist game");
                return;
            }
        };

        let data = GameStatisticCreate {
            user_sub: user_id.as_str().to_string(),
            final_score: i32::try_from(record.final_score).unwrap_or(i32::MAX),
            game_completed: record.game_completed,
            game_start_time: record.game_start_time,
            game_end_time: record.game_end_time,
        };
        let db = self.db.clone();

        handle.spawn(async move {
            match game_statistics::create(&db, data).await {
                Ok(row) => debug!(id = row.id, user_id = %user_id, "[STATS] game persisted"),
                Err(err) => error!(error = %err, user_id = %user_id, "[STATS] failed to persist game"),
            }
        });
    }
}
