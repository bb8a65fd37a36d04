use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "game_statistics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "user_sub")]
    pub user_sub: String,
    #[sea_orm(column_name = "final_score")]
    pub final_score: i32,
    #[sea_orm(column_name = "game_completed")]
    pub game_completed: bool,
    #[sea_orm(column_name = "game_start_time")]
    pub game_start_time: OffsetDateTime,
    #[sea_orm(column_name = "game_end_time")]
    pub game_end_time: OffsetDateTime,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
