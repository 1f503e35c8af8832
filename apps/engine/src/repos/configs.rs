//! Config repository functions.
//!
//! Rows store the raw (human-readable) form; loading parses and validates
//! into `RelayConfig`, so a corrupt row surfaces as a validation error with
//! a specific reason rather than propagating unchecked.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};
use time::OffsetDateTime;

use crate::domain::config::RelayConfig;
use crate::domain::duration::format_duration;
use crate::entities::configs;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    config_id: i64,
) -> Result<Option<RelayConfig>, DomainError> {
    let model = configs::Entity::find_by_id(config_id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    model.as_ref().map(RelayConfig::from_model).transpose()
}

pub async fn require_config<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    config_id: i64,
) -> Result<RelayConfig, DomainError> {
    find_by_id(conn, config_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Config, format!("config {config_id} not found"))
    })
}

pub async fn find_guild_default<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    guild_id: &str,
) -> Result<Option<RelayConfig>, DomainError> {
    let model = configs::Entity::find()
        .filter(configs::Column::GuildId.eq(guild_id))
        .filter(configs::Column::IsGuildDefault.eq(true))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    model.as_ref().map(RelayConfig::from_model).transpose()
}

fn pattern_to_raw(config: &RelayConfig) -> String {
    config
        .pattern
        .iter()
        .map(|k| match k {
            crate::entities::turns::ContributionKind::Writing => "writing",
            crate::entities::turns::ContributionKind::Drawing => "drawing",
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Persist a validated config. Set `is_guild_default` for the guild-wide
/// default row; season/game overrides are stored as non-default clones.
pub async fn create_config<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    config: &RelayConfig,
    is_guild_default: bool,
) -> Result<RelayConfig, DomainError> {
    config.validate()?;
    let now = OffsetDateTime::now_utc();
    let created = configs::ActiveModel {
        id: NotSet,
        guild_id: Set(config.guild_id.clone()),
        is_guild_default: Set(is_guild_default),
        pattern: Set(pattern_to_raw(config)),
        claim_timeout: Set(format_duration(config.claim_timeout)),
        write_timeout: Set(format_duration(config.write_timeout)),
        draw_timeout: Set(format_duration(config.draw_timeout)),
        write_warning: Set(format_duration(config.write_warning)),
        draw_warning: Set(format_duration(config.draw_warning)),
        open_duration: Set(format_duration(config.open_duration)),
        min_players: Set(config.min_players as i32),
        max_players: Set(config.max_players as i32),
        repeat_policy: Set(config.repeat_policy),
        standalone_turns: Set(config.standalone_turns as i32),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;
    RelayConfig::from_model(&created)
}
