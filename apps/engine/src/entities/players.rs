use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Platform account identity; stable string, unique per player.
    #[sea_orm(column_name = "external_id", unique)]
    pub external_id: String,
    #[sea_orm(column_name = "display_name")]
    pub display_name: String,
    /// Set while the player is banned; cleared on unban. Players are never
    /// hard-deleted.
    #[sea_orm(column_name = "banned_at")]
    pub banned_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::season_players::Entity")]
    SeasonPlayers,
    #[sea_orm(has_many = "super::turns::Entity")]
    Turns,
}

impl Related<super::season_players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeasonPlayers.def()
    }
}

impl Related<super::turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Turns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
