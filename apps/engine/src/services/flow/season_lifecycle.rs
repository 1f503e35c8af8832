//! Season lifecycle: roster recruitment, activation, cancellation,
//! completion.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::jobs::{season_open_expiry_job_id, JobKind};
use super::{notify, FlowService};
use crate::domain::transition::derive_season_transitions;
use crate::domain::turn::Turn;
use crate::entities::games::GameStatus;
use crate::entities::seasons::SeasonStatus;
use crate::errors::domain::{ConflictKind, DomainError, TransitionKind, ValidationKind};
use crate::repos::games::Game;
use crate::repos::seasons::Season;
use crate::repos::{configs, games, players, seasons};

/// Result of a successful join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub roster_len: u64,
    /// Set when this join filled the roster and activated the season.
    pub activated: bool,
}

impl FlowService {
    /// Derive the lifecycle events for a status change and fire the
    /// notifications they map to.
    async fn notify_season_events(
        &self,
        before: SeasonStatus,
        season: &Season,
        game_count: usize,
        roster_len: u64,
    ) -> Result<(), DomainError> {
        for transition in derive_season_transitions(before, season.status) {
            if let Some(instruction) = notify::season_event(
                &transition,
                &season.guild_id,
                season.id,
                game_count,
                roster_len,
            ) {
                self.notify(instruction).await?;
            }
        }
        Ok(())
    }

    pub async fn create_season(
        &self,
        txn: &DatabaseTransaction,
        guild_id: &str,
        created_by: i64,
        config_id: i64,
    ) -> Result<Season, DomainError> {
        // Fails early on a missing or invalid config row.
        configs::require_config(txn, config_id).await?;
        let season = seasons::create_season(txn, guild_id, created_by, config_id).await?;
        info!(season_id = season.id, guild_id, "season created");
        Ok(season)
    }

    /// SETUP -> OPEN: start recruiting and schedule the open-duration expiry.
    pub async fn open_season(
        &self,
        txn: &DatabaseTransaction,
        season_id: i64,
        now: OffsetDateTime,
    ) -> Result<Season, DomainError> {
        let season = seasons::open_season(txn, season_id, now).await?;
        let config = configs::require_config(txn, season.config_id).await?;
        self.schedule(
            season_open_expiry_job_id(season_id),
            now + config.open_duration,
            serde_json::json!({ "season_id": season_id }),
            JobKind::SeasonOpenExpiry,
        )
        .await?;
        info!(season_id, "season open for recruitment");
        Ok(season)
    }

    /// Join the roster. Each failure mode is a distinct reported outcome:
    /// missing season, season not open, banned player, duplicate join, full
    /// roster.
    pub async fn join_season(
        &self,
        txn: &DatabaseTransaction,
        season_id: i64,
        player_id: i64,
        now: OffsetDateTime,
    ) -> Result<JoinOutcome, DomainError> {
        let season = seasons::require_season(txn, season_id).await?;
        if season.status != SeasonStatus::Open {
            return Err(DomainError::transition(
                TransitionKind::WrongState,
                format!("season {season_id} is {:?}, not open for joining", season.status),
            ));
        }
        let player = players::require_player(txn, player_id).await?;
        if player.is_banned() {
            return Err(DomainError::validation(
                ValidationKind::PlayerBanned,
                format!("player {player_id} is banned"),
            ));
        }
        if seasons::is_on_roster(txn, season_id, player_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyJoined,
                format!("player {player_id} already joined season {season_id}"),
            ));
        }
        let config = configs::require_config(txn, season.config_id).await?;
        let roster_len = seasons::count_roster(txn, season_id).await?;
        if roster_len >= u64::from(config.max_players) {
            return Err(DomainError::conflict(
                ConflictKind::RosterFull,
                format!("season {season_id} roster is full ({roster_len})"),
            ));
        }

        // The count above is only valid for the season version it was read
        // under. The conditional bump admits one writer per version, so two
        // joins racing past the cap check cannot both insert.
        if !seasons::claim_roster_slot(txn, season_id, season.lock_version, now).await? {
            let season = seasons::require_season(txn, season_id).await?;
            if season.status != SeasonStatus::Open {
                return Err(DomainError::transition(
                    TransitionKind::WrongState,
                    format!(
                        "season {season_id} is {:?}, not open for joining",
                        season.status
                    ),
                ));
            }
            if seasons::count_roster(txn, season_id).await? >= u64::from(config.max_players) {
                return Err(DomainError::conflict(
                    ConflictKind::RosterFull,
                    format!("season {season_id} roster filled concurrently"),
                ));
            }
            return Err(DomainError::conflict(
                ConflictKind::OptimisticLock,
                format!("season {season_id} roster changed concurrently, retry"),
            ));
        }

        seasons::add_roster_member(txn, season_id, player_id, roster_len as i32).await?;
        let roster_len = roster_len + 1;
        info!(season_id, player_id, roster_len, "player joined season");

        let activated = roster_len >= u64::from(config.max_players);
        if activated {
            self.activate_season(txn, season_id, now).await?;
        }
        Ok(JoinOutcome {
            roster_len,
            activated,
        })
    }

    /// OPEN -> ACTIVE: one game per roster member, each with its first turn
    /// offered to that member. The conditional status move runs first, so a
    /// concurrent double activation fails before any game exists.
    pub async fn activate_season(
        &self,
        txn: &DatabaseTransaction,
        season_id: i64,
        now: OffsetDateTime,
    ) -> Result<Vec<(Game, Turn)>, DomainError> {
        let season = seasons::activate_season(txn, season_id, now).await?;
        self.cancel(season_open_expiry_job_id(season_id)).await;

        let config = configs::require_config(txn, season.config_id).await?;
        let roster = seasons::find_roster(txn, season_id).await?;

        let mut created = Vec::with_capacity(roster.len());
        for member in &roster {
            let pair = self
                .create_game_with_first_turn(
                    txn,
                    &season.guild_id,
                    season_id,
                    &config,
                    member.player_id,
                    now,
                )
                .await?;
            created.push(pair);
        }
        info!(season_id, game_count = created.len(), "season activated");
        // The conditional move succeeded, so the prior status was OPEN.
        self.notify_season_events(
            SeasonStatus::Open,
            &season,
            created.len(),
            roster.len() as u64,
        )
        .await?;
        Ok(created)
    }

    /// Open-duration expiry callback: activate when the roster reached the
    /// minimum, cancel otherwise. Stale firings (season no longer OPEN) are
    /// no-ops.
    pub async fn handle_open_expiry(
        &self,
        txn: &DatabaseTransaction,
        season_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let season = seasons::require_season(txn, season_id).await?;
        if season.status != SeasonStatus::Open {
            debug!(season_id, status = ?season.status, "stale open expiry, ignoring");
            return Ok(());
        }
        let config = configs::require_config(txn, season.config_id).await?;
        let roster_len = seasons::count_roster(txn, season_id).await?;

        if roster_len < u64::from(config.min_players) {
            let cancelled = seasons::cancel_season(txn, season_id, now).await?;
            info!(season_id, roster_len, "season cancelled below minimum roster");
            self.notify_season_events(season.status, &cancelled, 0, roster_len)
                .await?;
            return Ok(());
        }
        self.activate_season(txn, season_id, now).await?;
        Ok(())
    }

    pub async fn cancel_season(
        &self,
        txn: &DatabaseTransaction,
        season_id: i64,
        now: OffsetDateTime,
    ) -> Result<Season, DomainError> {
        let before = seasons::require_season(txn, season_id).await?;
        let season = seasons::cancel_season(txn, season_id, now).await?;
        self.cancel(season_open_expiry_job_id(season_id)).await;
        let roster_len = seasons::count_roster(txn, season_id).await?;
        info!(season_id, "season cancelled");
        self.notify_season_events(before.status, &season, 0, roster_len)
            .await?;
        Ok(season)
    }

    /// Admin-forced termination of a season and its unfinished games.
    pub async fn terminate_season(
        &self,
        txn: &DatabaseTransaction,
        season_id: i64,
        now: OffsetDateTime,
    ) -> Result<Season, DomainError> {
        let season = seasons::terminate_season(txn, season_id, now).await?;
        self.cancel(season_open_expiry_job_id(season_id)).await;
        for game in games::find_all_by_season(txn, season_id).await? {
            if !game.status.is_terminal() {
                games::terminate_game(txn, game.id, now).await?;
            }
        }
        info!(season_id, "season terminated");
        Ok(season)
    }

    /// A season completes when every game is COMPLETED. A season with zero
    /// games counts as complete only once it has left SETUP/PENDING; the
    /// branch is explicit rather than an accident of iterating an empty
    /// set.
    pub async fn check_season_completion(
        &self,
        txn: &DatabaseTransaction,
        season_id: i64,
        now: OffsetDateTime,
    ) -> Result<bool, DomainError> {
        let season = seasons::require_season(txn, season_id).await?;
        match season.status {
            SeasonStatus::Setup | SeasonStatus::Pending => return Ok(false),
            SeasonStatus::Completed => return Ok(true),
            SeasonStatus::Cancelled | SeasonStatus::Terminated => return Ok(false),
            SeasonStatus::Open | SeasonStatus::Active => {}
        }

        let games = games::find_all_by_season(txn, season_id).await?;
        let all_completed = games.iter().all(|g| g.status == GameStatus::Completed);
        if !all_completed {
            return Ok(false);
        }

        let completed = seasons::complete_season(txn, season_id, now).await?;
        info!(season_id, game_count = games.len(), "season completed");
        let roster_len = seasons::count_roster(txn, season_id).await?;
        self.notify_season_events(season.status, &completed, games.len(), roster_len)
            .await?;
        Ok(true)
    }
}
