//! Game statistics repository functions.

use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};

use crate::entities::game_statistics;
use crate::errors::domain::DomainError;

/// Stored statistic for one finished game
#[derive(Debug, Clone, PartialEq)]
pub struct GameStatistic {
    pub id: i64,
    pub user_sub: String,
    pub final_score: i32,
    pub game_completed: bool,
    pub game_start_time: time::OffsetDateTime,
    pub game_end_time: time::OffsetDateTime,
    pub created_at: time::OffsetDateTime,
}

/// Data for creating a statistic row
#[derive(Debug, Clone)]
pub struct GameStatisticCreate {
    pub user_sub: String,
    pub final_score: i32,
    pub game_completed: bool,
    pub game_start_time: time::OffsetDateTime,
    pub game_end_time: time::OffsetDateTime,
}

/// Insert a statistic row
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    data: GameStatisticCreate,
) -> Result<GameStatistic, DomainError> {
    let row = game_statistics::ActiveModel {
        id: sea_orm::NotSet,
        user_sub: Set(data.user_sub),
        final_score: Set(data.final_score),
        game_completed: Set(data.game_completed),
        game_start_time: Set(data.game_start_time),
        game_end_time: Set(data.game_end_time),
        created_at: Set(time::OffsetDateTime::now_utc()),
    }
    .insert(conn)
    .await?;

    Ok(GameStatistic::from(row))
}

impl From<game_statistics::Model> for GameStatistic {
    fn from(model: game_statistics::Model) -> Self {
        Self {
            id: model.id,
            user_sub: model.user_sub,
            final_score: model.final_score,
            game_completed: model.game_completed,
            game_start_time: model.game_start_time,
            game_end_time: model.game_end_time,
            created_at: model.created_at,
        }
    }
}
