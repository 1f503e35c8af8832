//! Season snapshot loading for the player selector.
//!
//! The snapshot must be read inside the same transaction as the turn
//! creation that consumes the selection, so history cannot go stale between
//! selection and offer.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::domain::selector::{GameView, RosterMember, SeasonView, TurnView};
use crate::entities::{games, turns};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;
use crate::repos::seasons;

pub async fn load_season_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<SeasonView, DomainError> {
    let roster = seasons::find_roster(conn, season_id)
        .await?
        .into_iter()
        .map(|entry| RosterMember {
            player_id: entry.player_id,
            external_id: entry.external_id,
        })
        .collect();

    let game_models = games::Entity::find()
        .filter(games::Column::SeasonId.eq(season_id))
        .all(conn)
        .await
        .map_err(map_db_err)?;
    let game_ids: Vec<i64> = game_models.iter().map(|g| g.id).collect();

    let turn_models = turns::Entity::find()
        .filter(turns::Column::GameId.is_in(game_ids))
        .all(conn)
        .await
        .map_err(map_db_err)?;

    let games = game_models
        .iter()
        .map(|game| GameView {
            game_id: game.id,
            turns: turn_models
                .iter()
                .filter(|t| t.game_id == game.id)
                .map(|t| TurnView {
                    turn_no: t.turn_no,
                    kind: t.kind,
                    status: t.status,
                    holder_id: t.holder_id,
                })
                .collect(),
        })
        .collect();

    Ok(SeasonView { roster, games })
}

/// Single-game snapshot for a standalone game with a caller-supplied
/// candidate roster (standalone games have no season roster of their own).
pub async fn load_standalone_view<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    roster: Vec<RosterMember>,
) -> Result<SeasonView, DomainError> {
    let turn_models = turns::Entity::find()
        .filter(turns::Column::GameId.eq(game_id))
        .all(conn)
        .await
        .map_err(map_db_err)?;

    Ok(SeasonView {
        roster,
        games: vec![GameView {
            game_id,
            turns: turn_models
                .iter()
                .map(|t| TurnView {
                    turn_no: t.turn_no,
                    kind: t.kind,
                    status: t.status,
                    holder_id: t.holder_id,
                })
                .collect(),
        }],
    })
}
