use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum GameStatistics {
    Table,
    Id,
    UserSub,
    FinalScore,
    GameCompleted,
    GameStartTime,
    GameEndTime,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GameStatistics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameStatistics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GameStatistics::UserSub).text().not_null())
                    .col(
                        ColumnDef::new(GameStatistics::FinalScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameStatistics::GameCompleted)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameStatistics::GameStartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameStatistics::GameEndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameStatistics::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Per-player history lookups
        manager
            .create_index(
                Index::create()
                    .name("ix_game_statistics_user_sub")
                    .table(GameStatistics::Table)
                    .col(GameStatistics::UserSub)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("ix_game_statistics_user_sub")
                    .table(GameStatistics::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GameStatistics::Table).to_owned())
            .await
    }
}
