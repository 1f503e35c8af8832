use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TurnStatus {
    #[sea_orm(string_value = "AVAILABLE")]
    Available,
    #[sea_orm(string_value = "OFFERED")]
    Offered,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "SKIPPED")]
    Skipped,
}

impl TurnStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, TurnStatus::Completed | TurnStatus::Skipped)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ContributionKind {
    #[sea_orm(string_value = "WRITING")]
    Writing,
    #[sea_orm(string_value = "DRAWING")]
    Drawing,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "turns")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "game_id")]
    pub game_id: i64,
    /// 1-based, unique and contiguous within a game.
    #[sea_orm(column_name = "turn_no")]
    pub turn_no: i32,
    pub kind: ContributionKind,
    pub status: TurnStatus,
    #[sea_orm(column_name = "holder_id")]
    pub holder_id: Option<i64>,
    #[sea_orm(column_name = "text_content")]
    pub text_content: Option<String>,
    #[sea_orm(column_name = "image_url")]
    pub image_url: Option<String>,
    /// Display context only; resolved by lookup, never an ownership edge.
    #[sea_orm(column_name = "previous_turn_id")]
    pub previous_turn_id: Option<i64>,
    #[sea_orm(column_name = "offered_at")]
    pub offered_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "claimed_at")]
    pub claimed_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "completed_at")]
    pub completed_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "skipped_at")]
    pub skipped_at: Option<OffsetDateTime>,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GameId",
        to = "super::games::Column::Id"
    )]
    Game,
    #[sea_orm(
        belongs_to = "super::players::Entity",
        from = "Column::HolderId",
        to = "super::players::Column::Id"
    )]
    Holder,
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::players::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Holder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
