//! Game repository functions.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, NotSet, QueryFilter,
    Set,
};
use time::OffsetDateTime;

use crate::entities::games::{self, GameStatus};
use crate::errors::domain::{DomainError, NotFoundKind, TransitionKind};
use crate::infra::db_errors::map_db_err;

/// Game domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub id: i64,
    pub guild_id: String,
    pub status: GameStatus,
    pub season_id: Option<i64>,
    pub config_id: i64,
    pub completed_at: Option<OffsetDateTime>,
    pub lock_version: i32,
}

impl Game {
    pub fn is_standalone(&self) -> bool {
        self.season_id.is_none()
    }
}

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            guild_id: model.guild_id,
            status: model.status,
            season_id: model.season_id,
            config_id: model.config_id,
            completed_at: model.completed_at,
            lock_version: model.lock_version,
        }
    }
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games::Entity::find_by_id(game_id)
        .one(conn)
        .await
        .map_err(map_db_err)?;
    Ok(game.map(Game::from))
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    find_by_id(conn, game_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Game, format!("game {game_id} not found"))
    })
}

pub async fn find_all_by_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<Game>, DomainError> {
    let models = games::Entity::find()
        .filter(games::Column::SeasonId.eq(season_id))
        .all(conn)
        .await
        .map_err(map_db_err)?;
    Ok(models.into_iter().map(Game::from).collect())
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    guild_id: &str,
    season_id: Option<i64>,
    config_id: i64,
    status: GameStatus,
) -> Result<Game, DomainError> {
    let now = OffsetDateTime::now_utc();
    let created = games::ActiveModel {
        id: NotSet,
        guild_id: Set(guild_id.to_string()),
        status: Set(status),
        season_id: Set(season_id),
        config_id: Set(config_id),
        completed_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        lock_version: Set(1),
    }
    .insert(conn)
    .await
    .map_err(map_db_err)?;
    Ok(Game::from(created))
}

/// ACTIVE -> COMPLETED, stamping `completed_at` exactly once. Returns false
/// when the game is already COMPLETED (idempotent re-check), and fails for
/// any other status.
pub async fn complete_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let result = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::value(GameStatus::Completed))
        .col_expr(games::Column::CompletedAt, Expr::value(Some(now)))
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::Status.eq(GameStatus::Active))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if result.rows_affected == 1 {
        return Ok(true);
    }
    let game = require_game(conn, game_id).await?;
    if game.status == GameStatus::Completed {
        return Ok(false);
    }
    Err(DomainError::transition(
        TransitionKind::WrongState,
        format!("game {game_id} is {:?}, cannot complete", game.status),
    ))
}

/// Any non-terminal status -> TERMINATED (admin-forced).
pub async fn terminate_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    now: OffsetDateTime,
) -> Result<Game, DomainError> {
    let result = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::value(GameStatus::Terminated))
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(game_id))
        .filter(
            Condition::any()
                .add(games::Column::Status.eq(GameStatus::Setup))
                .add(games::Column::Status.eq(GameStatus::Active)),
        )
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    if result.rows_affected == 0 {
        let game = require_game(conn, game_id).await?;
        return Err(DomainError::transition(
            TransitionKind::WrongState,
            format!("game {game_id} is {:?}, cannot terminate", game.status),
        ));
    }
    require_game(conn, game_id).await
}
