use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Repeat-play policy for pairing rules during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RepeatPolicy {
    /// A pairing that followed the same preceding player is avoided
    /// season-wide.
    #[sea_orm(string_value = "STRICT")]
    Strict,
    /// Pairing history is ignored; only the hard eligibility rules apply.
    #[sea_orm(string_value = "RELAXED")]
    Relaxed,
}

/// Raw, as-stored configuration. Duration fields hold the human-readable
/// form ("1d2h30m"); parsing and bounds checks live in
/// `crate::domain::config::RelayConfig`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "guild_id")]
    pub guild_id: String,
    /// Whether this row is the guild-wide default (cloned per season for
    /// custom overrides).
    #[sea_orm(column_name = "is_guild_default")]
    pub is_guild_default: bool,
    /// Contribution cycle, comma-separated ("writing,drawing").
    pub pattern: String,
    #[sea_orm(column_name = "claim_timeout")]
    pub claim_timeout: String,
    #[sea_orm(column_name = "write_timeout")]
    pub write_timeout: String,
    #[sea_orm(column_name = "draw_timeout")]
    pub draw_timeout: String,
    #[sea_orm(column_name = "write_warning")]
    pub write_warning: String,
    #[sea_orm(column_name = "draw_warning")]
    pub draw_warning: String,
    #[sea_orm(column_name = "open_duration")]
    pub open_duration: String,
    #[sea_orm(column_name = "min_players")]
    pub min_players: i32,
    #[sea_orm(column_name = "max_players")]
    pub max_players: i32,
    #[sea_orm(column_name = "repeat_policy")]
    pub repeat_policy: RepeatPolicy,
    /// Turn-count completion target for standalone games (season games
    /// complete by roster coverage instead).
    #[sea_orm(column_name = "standalone_turns")]
    pub standalone_turns: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seasons::Entity")]
    Seasons,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
