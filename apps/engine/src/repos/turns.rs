//! Turn repository functions.
//!
//! Every transition is a single conditional UPDATE carrying the state-machine
//! guards in its WHERE clause, so two callers racing on the same turn resolve
//! to exactly one winner. When the UPDATE matches no row, the current row is
//! re-read and run through the pure state machine to produce the same typed
//! failure the in-memory model would give.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::domain::turn::{validate_content, Turn, TurnContent};
use crate::entities::turns::{self, ContributionKind, TurnStatus};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::infra::db_errors::map_db_err;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Option<Turn>, DomainError> {
    let turn = turns::Entity::find_by_id(turn_id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(turn.map(Turn::from))
}

pub async fn require_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
) -> Result<Turn, DomainError> {
    find_by_id(conn, turn_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Turn, format!("turn {turn_id} not found"))
    })
}

/// All turns of a game in turn-number order.
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Turn>, DomainError> {
    let models = turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .order_by_asc(turns::Column::TurnNo)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(models.into_iter().map(Turn::from).collect())
}

/// Completed-or-skipped turns of a game in turn-number order.
pub async fn find_resolved_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Vec<Turn>, DomainError> {
    let models = turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .filter(
            Condition::any()
                .add(turns::Column::Status.eq(TurnStatus::Completed))
                .add(turns::Column::Status.eq(TurnStatus::Skipped)),
        )
        .order_by_asc(turns::Column::TurnNo)
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(models.into_iter().map(Turn::from).collect())
}

/// The game's AVAILABLE turn, if one exists. At most one can: advancement
/// resumes an unassigned turn instead of appending past it.
pub async fn find_available_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Turn>, DomainError> {
    let model = turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .filter(turns::Column::Status.eq(TurnStatus::Available))
        .order_by_asc(turns::Column::TurnNo)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(model.map(Turn::from))
}

pub async fn count_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<u64, DomainError> {
    turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .count(conn)
        .await
        .map_err(map_db_err)
}

/// Create the next turn in AVAILABLE state. `turn_no` must be contiguous;
/// the unique (game_id, turn_no) index rejects a concurrent duplicate as an
/// optimistic-lock conflict.
pub async fn create_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    turn_no: i32,
    kind: ContributionKind,
    previous_turn_id: Option<i64>,
) -> Result<Turn, DomainError> {
    let now = OffsetDateTime::now_utc();
    let created = turns::ActiveModel {
        id: NotSet,
        game_id: Set(game_id),
        turn_no: Set(turn_no),
        kind: Set(kind),
        status: Set(TurnStatus::Available),
        holder_id: Set(None),
        text_content: Set(None),
        image_url: Set(None),
        previous_turn_id: Set(previous_turn_id),
        offered_at: Set(None),
        claimed_at: Set(None),
        completed_at: Set(None),
        skipped_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;
    Ok(Turn::from(created))
}

/// Re-read the row after a missed conditional UPDATE and derive the typed
/// failure from the pure state machine. A row that would pass the guard now
/// lost a pure write-write race instead; that maps to an optimistic-lock
/// conflict the caller may retry.
async fn diagnose_missed_update<C, F>(
    conn: &C,
    turn_id: i64,
    check: F,
) -> DomainError
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(&mut Turn) -> Result<(), DomainError>,
{
    match find_by_id(conn, turn_id).await {
        Ok(Some(mut turn)) => match check(&mut turn) {
            Err(e) => e,
            Ok(()) => DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!("turn {turn_id} was modified concurrently, retry"),
            ),
        },
        Ok(None) => {
            DomainError::not_found(NotFoundKind::Turn, format!("turn {turn_id} not found"))
        }
        Err(e) => e,
    }
}

/// AVAILABLE -> OFFERED.
pub async fn offer_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
    now: OffsetDateTime,
) -> Result<Turn, DomainError> {
    let result = turns::Entity::update_many()
        .col_expr(turns::Column::Status, Expr::value(TurnStatus::Offered))
        .col_expr(turns::Column::HolderId, Expr::value(Some(player_id)))
        .col_expr(turns::Column::OfferedAt, Expr::value(Some(now)))
        .col_expr(turns::Column::UpdatedAt, Expr::value(now))
        .filter(turns::Column::Id.eq(turn_id))
        .filter(turns::Column::Status.eq(TurnStatus::Available))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if result.rows_affected == 0 {
        return Err(diagnose_missed_update(conn, turn_id, |t| t.offer(player_id, now)).await);
    }
    require_turn(conn, turn_id).await
}

/// OFFERED -> PENDING; succeeds only when the holder is unset or matches.
pub async fn claim_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
    now: OffsetDateTime,
) -> Result<Turn, DomainError> {
    let result = turns::Entity::update_many()
        .col_expr(turns::Column::Status, Expr::value(TurnStatus::Pending))
        .col_expr(turns::Column::HolderId, Expr::value(Some(player_id)))
        .col_expr(turns::Column::ClaimedAt, Expr::value(Some(now)))
        .col_expr(turns::Column::UpdatedAt, Expr::value(now))
        .filter(turns::Column::Id.eq(turn_id))
        .filter(turns::Column::Status.eq(TurnStatus::Offered))
        .filter(
            Condition::any()
                .add(turns::Column::HolderId.is_null())
                .add(turns::Column::HolderId.eq(player_id)),
        )
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if result.rows_affected == 0 {
        return Err(diagnose_missed_update(conn, turn_id, |t| t.claim(player_id, now)).await);
    }
    require_turn(conn, turn_id).await
}

/// OFFERED -> AVAILABLE; clears the holder so the turn can be re-offered.
pub async fn dismiss_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
    now: OffsetDateTime,
) -> Result<Turn, DomainError> {
    let result = turns::Entity::update_many()
        .col_expr(turns::Column::Status, Expr::value(TurnStatus::Available))
        .col_expr(turns::Column::HolderId, Expr::value(Option::<i64>::None))
        .col_expr(
            turns::Column::OfferedAt,
            Expr::value(Option::<OffsetDateTime>::None),
        )
        .col_expr(turns::Column::UpdatedAt, Expr::value(now))
        .filter(turns::Column::Id.eq(turn_id))
        .filter(turns::Column::Status.eq(TurnStatus::Offered))
        .filter(turns::Column::HolderId.eq(player_id))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if result.rows_affected == 0 {
        return Err(diagnose_missed_update(conn, turn_id, |t| t.dismiss(player_id)).await);
    }
    require_turn(conn, turn_id).await
}

/// PENDING -> COMPLETED with validated content.
pub async fn submit_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    player_id: i64,
    content: TurnContent,
    now: OffsetDateTime,
) -> Result<Turn, DomainError> {
    // Content checks never depend on row state, so run them before touching
    // the store; a failed submit must leave the turn PENDING.
    let turn = require_turn(conn, turn_id).await?;
    validate_content(turn.kind, &content)?;

    let (text, image) = match content {
        TurnContent::Text(s) => (Some(s), None),
        TurnContent::Image(s) => (None, Some(s)),
    };

    let result = turns::Entity::update_many()
        .col_expr(turns::Column::Status, Expr::value(TurnStatus::Completed))
        .col_expr(turns::Column::TextContent, Expr::value(text))
        .col_expr(turns::Column::ImageUrl, Expr::value(image))
        .col_expr(turns::Column::CompletedAt, Expr::value(Some(now)))
        .col_expr(turns::Column::UpdatedAt, Expr::value(now))
        .filter(turns::Column::Id.eq(turn_id))
        .filter(turns::Column::Status.eq(TurnStatus::Pending))
        .filter(turns::Column::HolderId.eq(player_id))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if result.rows_affected == 0 {
        return Err(diagnose_missed_update(conn, turn_id, |t| t.guard_submit(player_id)).await);
    }
    require_turn(conn, turn_id).await
}

/// PENDING -> SKIPPED (submission timeout or admin skip).
pub async fn skip_turn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    turn_id: i64,
    now: OffsetDateTime,
) -> Result<Turn, DomainError> {
    let result = turns::Entity::update_many()
        .col_expr(turns::Column::Status, Expr::value(TurnStatus::Skipped))
        .col_expr(turns::Column::SkippedAt, Expr::value(Some(now)))
        .col_expr(turns::Column::UpdatedAt, Expr::value(now))
        .filter(turns::Column::Id.eq(turn_id))
        .filter(turns::Column::Status.eq(TurnStatus::Pending))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if result.rows_affected == 0 {
        return Err(diagnose_missed_update(conn, turn_id, |t| t.skip(now)).await);
    }
    require_turn(conn, turn_id).await
}
