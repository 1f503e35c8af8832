//! Season repository functions, including roster membership.
//!
//! Status moves are conditional UPDATEs on the expected current status, so a
//! double activation or a stale open-duration callback misses the row and
//! surfaces as an ordinary transition failure instead of duplicating games.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::seasons::{self, SeasonStatus};
use crate::entities::{players, season_players};
use crate::errors::domain::{DomainError, NotFoundKind, TransitionKind};
use crate::infra::db_errors::map_db_err;

/// Season domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Season {
    pub id: i64,
    pub guild_id: String,
    pub status: SeasonStatus,
    pub created_by: i64,
    pub config_id: i64,
    pub opened_at: Option<OffsetDateTime>,
    pub activated_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub lock_version: i32,
}

impl From<seasons::Model> for Season {
    fn from(model: seasons::Model) -> Self {
        Self {
            id: model.id,
            guild_id: model.guild_id,
            status: model.status,
            created_by: model.created_by,
            config_id: model.config_id,
            opened_at: model.opened_at,
            activated_at: model.activated_at,
            completed_at: model.completed_at,
            lock_version: model.lock_version,
        }
    }
}

/// Roster entry joined with the player's stable identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub player_id: i64,
    pub external_id: String,
    pub display_name: String,
    pub join_order: i32,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Option<Season>, DomainError> {
    let season = seasons::Entity::find_by_id(season_id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(season.map(Season::from))
}

pub async fn require_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Season, DomainError> {
    find_by_id(conn, season_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Season, format!("season {season_id} not found"))
    })
}

pub async fn create_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    guild_id: &str,
    created_by: i64,
    config_id: i64,
) -> Result<Season, DomainError> {
    let now = OffsetDateTime::now_utc();
    let created = seasons::ActiveModel {
        id: NotSet,
        guild_id: Set(guild_id.to_string()),
        status: Set(SeasonStatus::Setup),
        created_by: Set(created_by),
        config_id: Set(config_id),
        opened_at: Set(None),
        activated_at: Set(None),
        completed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;
    Ok(Season::from(created))
}

/// Conditional status move: `from` -> `to`, optionally stamping a timestamp
/// column. Misses report the actual current status.
async fn move_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    from: Condition,
    to: SeasonStatus,
    stamp: Option<seasons::Column>,
    now: OffsetDateTime,
) -> Result<Season, DomainError> {
    let mut update = seasons::Entity::update_many()
        .col_expr(seasons::Column::Status, Expr::value(to))
        .col_expr(seasons::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            seasons::Column::LockVersion,
            Expr::col(seasons::Column::LockVersion).add(1),
        )
        .filter(seasons::Column::Id.eq(season_id))
        .filter(from);
    if let Some(column) = stamp {
        update = update.col_expr(column, Expr::value(Some(now)));
    }
    let result = update.exec(conn).await.map_err(map_db_err)?;

    if result.rows_affected == 0 {
        let season = find_by_id(conn, season_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Season, format!("season {season_id} not found"))
        })?;
        return Err(DomainError::transition(
            TransitionKind::WrongState,
            format!(
                "season {season_id} is {:?}, cannot move to {to:?}",
                season.status
            ),
        ));
    }
    require_season(conn, season_id).await
}

/// SETUP -> OPEN; stamps `opened_at`.
pub async fn open_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    now: OffsetDateTime,
) -> Result<Season, DomainError> {
    move_status(
        conn,
        season_id,
        Condition::all().add(seasons::Column::Status.eq(SeasonStatus::Setup)),
        SeasonStatus::Open,
        Some(seasons::Column::OpenedAt),
        now,
    )
    .await
}

/// OPEN -> ACTIVE; stamps `activated_at`. A second activation misses the
/// conditional update and fails without touching games.
pub async fn activate_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    now: OffsetDateTime,
) -> Result<Season, DomainError> {
    move_status(
        conn,
        season_id,
        Condition::all().add(seasons::Column::Status.eq(SeasonStatus::Open)),
        SeasonStatus::Active,
        Some(seasons::Column::ActivatedAt),
        now,
    )
    .await
}

/// OPEN|PENDING -> CANCELLED.
pub async fn cancel_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    now: OffsetDateTime,
) -> Result<Season, DomainError> {
    move_status(
        conn,
        season_id,
        Condition::any()
            .add(seasons::Column::Status.eq(SeasonStatus::Open))
            .add(seasons::Column::Status.eq(SeasonStatus::Pending)),
        SeasonStatus::Cancelled,
        None,
        now,
    )
    .await
}

/// ACTIVE -> COMPLETED; stamps `completed_at` exactly once.
pub async fn complete_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    now: OffsetDateTime,
) -> Result<Season, DomainError> {
    move_status(
        conn,
        season_id,
        Condition::all().add(seasons::Column::Status.eq(SeasonStatus::Active)),
        SeasonStatus::Completed,
        Some(seasons::Column::CompletedAt),
        now,
    )
    .await
}

/// Any non-terminal status -> TERMINATED (admin-forced).
pub async fn terminate_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    now: OffsetDateTime,
) -> Result<Season, DomainError> {
    move_status(
        conn,
        season_id,
        Condition::any()
            .add(seasons::Column::Status.eq(SeasonStatus::Setup))
            .add(seasons::Column::Status.eq(SeasonStatus::Pending))
            .add(seasons::Column::Status.eq(SeasonStatus::Open))
            .add(seasons::Column::Status.eq(SeasonStatus::Active)),
        SeasonStatus::Terminated,
        None,
        now,
    )
    .await
}

/// Roster in join order with player identities.
pub async fn find_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<RosterEntry>, DomainError> {
    let memberships = season_players::Entity::find()
        .filter(season_players::Column::SeasonId.eq(season_id))
        .order_by_asc(season_players::Column::JoinOrder)
        .all(conn)
        .await
        .map_err(map_db_err)?;

    let player_ids: Vec<i64> = memberships.iter().map(|m| m.player_id).collect();
    let player_models = players::Entity::find()
        .filter(players::Column::Id.is_in(player_ids))
        .all(conn)
        .await
        .map_err(map_db_err)?;

    let mut roster = Vec::with_capacity(memberships.len());
    for membership in &memberships {
        let player = player_models
            .iter()
            .find(|p| p.id == membership.player_id)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Player,
                    format!("roster player {} not found", membership.player_id),
                )
            })?;
        roster.push(RosterEntry {
            player_id: player.id,
            external_id: player.external_id.clone(),
            display_name: player.display_name.clone(),
            join_order: membership.join_order,
        });
    }
    Ok(roster)
}

pub async fn count_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<u64, DomainError> {
    season_players::Entity::find()
        .filter(season_players::Column::SeasonId.eq(season_id))
        .count(conn)
        .await
        .map_err(map_db_err)
}

pub async fn is_on_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    player_id: i64,
) -> Result<bool, DomainError> {
    let count = season_players::Entity::find()
        .filter(season_players::Column::SeasonId.eq(season_id))
        .filter(season_players::Column::PlayerId.eq(player_id))
        .count(conn)
        .await
        .map_err(map_db_err)?;
    Ok(count > 0)
}

/// Serialize roster writes through the season row: a conditional
/// `lock_version` bump that misses when another joiner or a status move got
/// there first. Returns whether this caller won the slot; after a miss the
/// caller re-reads and re-diagnoses (full roster, season no longer open, or
/// a plain concurrent-retry conflict).
pub async fn claim_roster_slot<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    expected_version: i32,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let result = seasons::Entity::update_many()
        .col_expr(
            seasons::Column::LockVersion,
            Expr::col(seasons::Column::LockVersion).add(1),
        )
        .col_expr(seasons::Column::UpdatedAt, Expr::value(now))
        .filter(seasons::Column::Id.eq(season_id))
        .filter(seasons::Column::LockVersion.eq(expected_version))
        .filter(seasons::Column::Status.eq(SeasonStatus::Open))
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    Ok(result.rows_affected == 1)
}

/// Append a roster member; the unique (season_id, player_id) index turns a
/// concurrent duplicate join into an `AlreadyJoined` conflict.
pub async fn add_roster_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
    player_id: i64,
    join_order: i32,
) -> Result<(), DomainError> {
    let now = OffsetDateTime::now_utc();
    season_players::ActiveModel {
        id: NotSet,
        season_id: Set(season_id),
        player_id: Set(player_id),
        join_order: Set(join_order),
        created_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;
    Ok(())
}
