//! Game lifecycle: turn creation, advancement, completion.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::{notify, FlowService};
use crate::domain::config::RelayConfig;
use crate::domain::selector::{self, RosterMember};
use crate::domain::transition::derive_game_transitions;
use crate::domain::turn::Turn;
use crate::entities::games::GameStatus;
use crate::errors::domain::{DomainError, NotFoundKind, TransitionKind, ValidationKind};
use crate::repos::games::Game;
use crate::repos::{configs, games, season_view, seasons, turns};

/// Two explicit completion strategies: season games complete by roster
/// coverage, standalone games by turn count. Never inferred from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Complete when every roster member has a completed/skipped turn.
    RosterCoverage,
    /// Complete when this many turns are completed/skipped.
    TurnCount { target: u32 },
}

pub fn completion_policy(game: &Game, config: &RelayConfig) -> CompletionPolicy {
    if game.is_standalone() {
        CompletionPolicy::TurnCount {
            target: config.standalone_turns,
        }
    } else {
        CompletionPolicy::RosterCoverage
    }
}

/// What happened after a turn resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveOutcome {
    /// The game completed; includes whether its season completed with it.
    GameCompleted { season_completed: bool },
    /// A new turn was created and offered.
    NextOffered(Turn),
    /// Standalone game needs a caller-supplied candidate roster to advance.
    AwaitingCandidates,
}

impl FlowService {
    /// Create a season game with its first turn already offered to the given
    /// roster member.
    pub(super) async fn create_game_with_first_turn(
        &self,
        txn: &DatabaseTransaction,
        guild_id: &str,
        season_id: i64,
        config: &RelayConfig,
        first_player_id: i64,
        now: OffsetDateTime,
    ) -> Result<(Game, Turn), DomainError> {
        let game = games::create_game(txn, guild_id, Some(season_id), config.id, GameStatus::Active)
            .await?;
        let turn = turns::create_turn(txn, game.id, 1, config.kind_at(1), None).await?;
        let turn = self
            .offer_turn(txn, config, turn.id, first_player_id, now)
            .await?;
        debug!(game_id = game.id, season_id, "game created with first turn offered");
        Ok((game, turn))
    }

    /// Create the next AVAILABLE turn and offer it to the selected player.
    ///
    /// Selection runs against a snapshot read in this same transaction. On a
    /// selection failure the AVAILABLE turn stays in place and the error
    /// propagates for retry or escalation; the game is never silently
    /// dropped.
    pub async fn advance_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        now: OffsetDateTime,
    ) -> Result<Turn, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        if game.status != GameStatus::Active {
            return Err(DomainError::transition(
                TransitionKind::WrongState,
                format!("game {game_id} is {:?}, cannot advance", game.status),
            ));
        }
        let season_id = game.season_id.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::Other("STANDALONE".into()),
                "standalone games advance with an explicit candidate roster",
            )
        })?;
        let config = configs::require_config(txn, game.config_id).await?;

        let turn = self.next_open_turn(txn, game_id, &config).await?;

        let view = season_view::load_season_view(txn, season_id).await?;
        let player_id =
            selector::select_next_player(&view, game_id, turn.kind, config.repeat_policy)?;
        self.offer_turn(txn, &config, turn.id, player_id, now).await
    }

    /// Advance a standalone game using a platform-supplied candidate roster.
    pub async fn advance_standalone(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        roster: Vec<RosterMember>,
        now: OffsetDateTime,
    ) -> Result<Turn, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        if game.status != GameStatus::Active {
            return Err(DomainError::transition(
                TransitionKind::WrongState,
                format!("game {game_id} is {:?}, cannot advance", game.status),
            ));
        }
        let config = configs::require_config(txn, game.config_id).await?;

        let turn = self.next_open_turn(txn, game_id, &config).await?;

        let view = season_view::load_standalone_view(txn, game_id, roster).await?;
        let player_id =
            selector::select_next_player(&view, game_id, turn.kind, config.repeat_policy)?;
        self.offer_turn(txn, &config, turn.id, player_id, now).await
    }

    /// The turn an advance should assign: the game's existing AVAILABLE turn
    /// when one exists, a freshly created one otherwise. A selection failure
    /// strands its AVAILABLE turn in place, and the retry must resume that
    /// turn; appending past it would orphan the row and shift the
    /// contribution cycle by a slot.
    async fn next_open_turn(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        config: &RelayConfig,
    ) -> Result<Turn, DomainError> {
        if let Some(turn) = turns::find_available_by_game(txn, game_id).await? {
            debug!(game_id, turn_id = turn.id, turn_no = turn.turn_no, "resuming open turn");
            return Ok(turn);
        }
        let resolved = turns::find_resolved_by_game(txn, game_id).await?;
        let previous_turn_id = resolved.last().map(|t| t.id);
        let turn_no = turns::count_by_game(txn, game_id).await? as i32 + 1;
        turns::create_turn(txn, game_id, turn_no, config.kind_at(turn_no), previous_turn_id).await
    }

    /// Re-offer an existing AVAILABLE turn (after a dismissal or claim
    /// timeout) without creating a new one.
    pub(super) async fn reoffer_turn(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        now: OffsetDateTime,
    ) -> Result<Turn, DomainError> {
        let turn = turns::require_turn(txn, turn_id).await?;
        let game = games::require_game(txn, turn.game_id).await?;
        let config = configs::require_config(txn, game.config_id).await?;
        let season_id = game.season_id.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::Other("STANDALONE".into()),
                "standalone games re-offer with an explicit candidate roster",
            )
        })?;

        let view = season_view::load_season_view(txn, season_id).await?;
        let player_id =
            selector::select_next_player(&view, game.id, turn.kind, config.repeat_policy)?;
        self.offer_turn(txn, &config, turn_id, player_id, now).await
    }

    /// Completion check under the game's policy. Stamps `completed_at`
    /// exactly once; re-checking a completed game is a no-op.
    pub async fn check_game_completion(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        now: OffsetDateTime,
    ) -> Result<bool, DomainError> {
        let game = games::require_game(txn, game_id).await?;
        if game.status == GameStatus::Completed {
            return Ok(true);
        }
        if game.status != GameStatus::Active {
            return Ok(false);
        }
        let config = configs::require_config(txn, game.config_id).await?;
        let resolved = turns::find_resolved_by_game(txn, game_id).await?;

        let complete = match completion_policy(&game, &config) {
            CompletionPolicy::RosterCoverage => {
                let season_id = game.season_id.ok_or_else(|| {
                    DomainError::not_found(NotFoundKind::Season, "roster-coverage game lost its season")
                })?;
                let roster = seasons::find_roster(txn, season_id).await?;
                roster.iter().all(|member| {
                    resolved
                        .iter()
                        .any(|t| t.holder_id == Some(member.player_id))
                })
            }
            CompletionPolicy::TurnCount { target } => resolved.len() as u32 >= target,
        };

        if !complete {
            return Ok(false);
        }
        let newly_completed = games::complete_game(txn, game_id, now).await?;
        if newly_completed {
            info!(game_id, "game completed");
            for transition in derive_game_transitions(game.status, GameStatus::Completed) {
                if let Some(instruction) = notify::game_event(&transition, &game.guild_id, game_id)
                {
                    self.notify(instruction).await?;
                }
            }
        }
        Ok(true)
    }

    /// After a turn resolves: declare completion or create-and-offer the
    /// next turn.
    pub(super) async fn resolve_next(
        &self,
        txn: &DatabaseTransaction,
        game_id: i64,
        _resolved_turn_id: Option<i64>,
        now: OffsetDateTime,
    ) -> Result<ResolveOutcome, DomainError> {
        if self.check_game_completion(txn, game_id, now).await? {
            let game = games::require_game(txn, game_id).await?;
            let season_completed = match game.season_id {
                Some(season_id) => self.check_season_completion(txn, season_id, now).await?,
                None => false,
            };
            return Ok(ResolveOutcome::GameCompleted { season_completed });
        }
        let game = games::require_game(txn, game_id).await?;
        if game.is_standalone() {
            return Ok(ResolveOutcome::AwaitingCandidates);
        }
        let turn = self.advance_game(txn, game_id, now).await?;
        Ok(ResolveOutcome::NextOffered(turn))
    }
}
