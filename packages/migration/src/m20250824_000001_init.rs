use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Players {
    Table,
    Id,
    ExternalId,
    DisplayName,
    BannedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Configs {
    Table,
    Id,
    GuildId,
    IsGuildDefault,
    Pattern,
    ClaimTimeout,
    WriteTimeout,
    DrawTimeout,
    WriteWarning,
    DrawWarning,
    OpenDuration,
    MinPlayers,
    MaxPlayers,
    RepeatPolicy,
    StandaloneTurns,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Seasons {
    Table,
    Id,
    GuildId,
    Status,
    CreatedBy,
    ConfigId,
    OpenedAt,
    ActivatedAt,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum SeasonPlayers {
    Table,
    Id,
    SeasonId,
    PlayerId,
    JoinOrder,
    CreatedAt,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    GuildId,
    Status,
    SeasonId,
    ConfigId,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
    LockVersion,
}

#[derive(Iden)]
enum Turns {
    Table,
    Id,
    GameId,
    TurnNo,
    Kind,
    Status,
    HolderId,
    TextContent,
    ImageUrl,
    PreviousTurnId,
    OfferedAt,
    ClaimedAt,
    CompletedAt,
    SkippedAt,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // players
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Players::ExternalId).string().not_null())
                    .col(ColumnDef::new(Players::DisplayName).string().not_null())
                    .col(
                        ColumnDef::new(Players::BannedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // unique index on players.external_id
        manager
            .create_index(
                Index::create()
                    .name("ux_players_external_id")
                    .table(Players::Table)
                    .col(Players::ExternalId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // configs
        manager
            .create_table(
                Table::create()
                    .table(Configs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Configs::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Configs::GuildId).string().not_null())
                    .col(
                        ColumnDef::new(Configs::IsGuildDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Configs::Pattern).string().not_null())
                    .col(ColumnDef::new(Configs::ClaimTimeout).string().not_null())
                    .col(ColumnDef::new(Configs::WriteTimeout).string().not_null())
                    .col(ColumnDef::new(Configs::DrawTimeout).string().not_null())
                    .col(ColumnDef::new(Configs::WriteWarning).string().not_null())
                    .col(ColumnDef::new(Configs::DrawWarning).string().not_null())
                    .col(ColumnDef::new(Configs::OpenDuration).string().not_null())
                    .col(ColumnDef::new(Configs::MinPlayers).integer().not_null())
                    .col(ColumnDef::new(Configs::MaxPlayers).integer().not_null())
                    .col(
                        ColumnDef::new(Configs::RepeatPolicy)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Configs::StandaloneTurns)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Configs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Configs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // guild-default lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_configs_guild_id")
                    .table(Configs::Table)
                    .col(Configs::GuildId)
                    .to_owned(),
            )
            .await?;

        // seasons
        manager
            .create_table(
                Table::create()
                    .table(Seasons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Seasons::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Seasons::GuildId).string().not_null())
                    .col(ColumnDef::new(Seasons::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Seasons::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Seasons::ConfigId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Seasons::OpenedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Seasons::ActivatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Seasons::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Seasons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Seasons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Seasons::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_seasons_config_id")
                            .from(Seasons::Table, Seasons::ConfigId)
                            .to(Configs::Table, Configs::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_seasons_guild_id_status")
                    .table(Seasons::Table)
                    .col(Seasons::GuildId)
                    .col(Seasons::Status)
                    .to_owned(),
            )
            .await?;

        // season_players
        manager
            .create_table(
                Table::create()
                    .table(SeasonPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SeasonPlayers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(SeasonPlayers::SeasonId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeasonPlayers::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeasonPlayers::JoinOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SeasonPlayers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_season_players_season_id")
                            .from(SeasonPlayers::Table, SeasonPlayers::SeasonId)
                            .to(Seasons::Table, Seasons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_season_players_player_id")
                            .from(SeasonPlayers::Table, SeasonPlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // one roster row per (season, player); the duplicate-join guard
        manager
            .create_index(
                Index::create()
                    .name("ux_season_players_season_id_player_id")
                    .table(SeasonPlayers::Table)
                    .col(SeasonPlayers::SeasonId)
                    .col(SeasonPlayers::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Games::GuildId).string().not_null())
                    .col(ColumnDef::new(Games::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Games::SeasonId).big_integer().null())
                    .col(ColumnDef::new(Games::ConfigId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Games::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Games::LockVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_season_id")
                            .from(Games::Table, Games::SeasonId)
                            .to(Seasons::Table, Seasons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_config_id")
                            .from(Games::Table, Games::ConfigId)
                            .to(Configs::Table, Configs::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_season_id")
                    .table(Games::Table)
                    .col(Games::SeasonId)
                    .to_owned(),
            )
            .await?;

        // turns
        manager
            .create_table(
                Table::create()
                    .table(Turns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Turns::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Turns::GameId).big_integer().not_null())
                    .col(ColumnDef::new(Turns::TurnNo).integer().not_null())
                    .col(ColumnDef::new(Turns::Kind).string_len(16).not_null())
                    .col(ColumnDef::new(Turns::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Turns::HolderId).big_integer().null())
                    .col(ColumnDef::new(Turns::TextContent).text().null())
                    .col(ColumnDef::new(Turns::ImageUrl).string().null())
                    .col(ColumnDef::new(Turns::PreviousTurnId).big_integer().null())
                    .col(
                        ColumnDef::new(Turns::OfferedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Turns::ClaimedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Turns::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Turns::SkippedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Turns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Turns::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_game_id")
                            .from(Turns::Table, Turns::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_turns_holder_id")
                            .from(Turns::Table, Turns::HolderId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // turn numbers are unique and contiguous per game
        manager
            .create_index(
                Index::create()
                    .name("ux_turns_game_id_turn_no")
                    .table(Turns::Table)
                    .col(Turns::GameId)
                    .col(Turns::TurnNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_turns_holder_id_status")
                    .table(Turns::Table)
                    .col(Turns::HolderId)
                    .col(Turns::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Turns::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(SeasonPlayers::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Configs::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
