use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SeasonStatus {
    #[sea_orm(string_value = "SETUP")]
    Setup,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "TERMINATED")]
    Terminated,
}

impl SeasonStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SeasonStatus::Completed | SeasonStatus::Cancelled | SeasonStatus::Terminated
        )
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seasons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "guild_id")]
    pub guild_id: String,
    pub status: SeasonStatus,
    #[sea_orm(column_name = "created_by")]
    pub created_by: i64,
    #[sea_orm(column_name = "config_id")]
    pub config_id: i64,
    #[sea_orm(column_name = "opened_at")]
    pub opened_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "activated_at")]
    pub activated_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::configs::Entity",
        from = "Column::ConfigId",
        to = "super::configs::Column::Id"
    )]
    Config,
    #[sea_orm(has_many = "super::season_players::Entity")]
    SeasonPlayers,
    #[sea_orm(has_many = "super::games::Entity")]
    Games,
}

impl Related<super::configs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Config.def()
    }
}

impl Related<super::season_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeasonPlayers.def()
    }
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Games.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
