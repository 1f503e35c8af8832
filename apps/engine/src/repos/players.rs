//! Player repository functions.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};
use time::OffsetDateTime;

use crate::entities::players;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

/// Player domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    pub external_id: String,
    pub display_name: String,
    pub banned_at: Option<OffsetDateTime>,
}

impl Player {
    pub fn is_banned(&self) -> bool {
        self.banned_at.is_some()
    }
}

impl From<players::Model> for Player {
    fn from(model: players::Model) -> Self {
        Self {
            id: model.id,
            external_id: model.external_id,
            display_name: model.display_name,
            banned_at: model.banned_at,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players::Entity::find_by_id(player_id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(player.map(Player::from))
}

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    find_by_id(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("player {player_id} not found"))
    })
}

pub async fn find_by_external_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    external_id: &str,
) -> Result<Option<Player>, DomainError> {
    let player = players::Entity::find()
        .filter(players::Column::ExternalId.eq(external_id))
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(player.map(Player::from))
}

/// Players are created on first interaction and never deleted.
pub async fn get_or_create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    external_id: &str,
    display_name: &str,
) -> Result<Player, DomainError> {
    if let Some(player) = find_by_external_id(conn, external_id).await? {
        return Ok(player);
    }
    let now = OffsetDateTime::now_utc();
    let created = players::ActiveModel {
        id: NotSet,
        external_id: Set(external_id.to_string()),
        display_name: Set(display_name.to_string()),
        banned_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;
    Ok(Player::from(created))
}

/// Set or clear the ban flag (admin action).
pub async fn set_banned<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    banned_at: Option<OffsetDateTime>,
) -> Result<Player, DomainError> {
    let model = players::Entity::find_by_id(player_id)
        .one(conn)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("player {player_id} not found"))
        })?;
    let mut active: players::ActiveModel = model.into();
    active.banned_at = Set(banned_at);
    active.updated_at = Set(OffsetDateTime::now_utc());
    let updated = active.update(conn).await.map_err(map_db_err)?;
    Ok(Player::from(updated))
}
