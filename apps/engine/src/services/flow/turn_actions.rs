//! Player-facing turn actions and timeout callbacks.
//!
//! Every entry point is guarded by the turn state machine's conditional
//! updates, so concurrent triggers (a claim racing a timeout, a duplicate
//! callback) resolve to one winner and ordinary `Transition` outcomes.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use super::jobs::{
    claim_timeout_job_id, submission_timeout_job_id, submission_warning_job_id, JobKind,
};
use super::{notify, FlowService, ResolveOutcome};
use crate::domain::config::RelayConfig;
use crate::domain::turn::{Turn, TurnContent};
use crate::errors::domain::{DomainError, TransitionKind};
use crate::entities::turns::TurnStatus;
use crate::repos::{configs, games, turns};

impl FlowService {
    /// Offer an AVAILABLE turn to a selected player: conditional update,
    /// claim-timeout scheduling, offer notification.
    pub(super) async fn offer_turn(
        &self,
        txn: &DatabaseTransaction,
        config: &RelayConfig,
        turn_id: i64,
        player_id: i64,
        now: OffsetDateTime,
    ) -> Result<Turn, DomainError> {
        let turn = turns::offer_turn(txn, turn_id, player_id, now).await?;
        info!(turn_id, player_id, game_id = turn.game_id, "turn offered");

        self.schedule(
            claim_timeout_job_id(turn_id),
            now + config.claim_timeout,
            serde_json::json!({ "turn_id": turn_id }),
            JobKind::ClaimTimeout,
        )
        .await?;
        self.notify(notify::turn_offered(
            player_id,
            turn.game_id,
            turn_id,
            turn.turn_no,
        ))
        .await?;
        Ok(turn)
    }

    /// Claim an offered turn. Of two racing claimants at most one succeeds;
    /// the loser sees a `Transition` failure.
    pub async fn claim_turn(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        player_id: i64,
        now: OffsetDateTime,
    ) -> Result<Turn, DomainError> {
        let turn = turns::claim_turn(txn, turn_id, player_id, now).await?;
        info!(turn_id, player_id, "turn claimed");

        self.cancel(claim_timeout_job_id(turn_id)).await;

        let game = games::require_game(txn, turn.game_id).await?;
        let config = configs::require_config(txn, game.config_id).await?;
        let timeout = config.submit_timeout(turn.kind);
        let warning = config.submit_warning(turn.kind);
        self.schedule(
            submission_warning_job_id(turn_id),
            now + timeout - warning,
            serde_json::json!({ "turn_id": turn_id }),
            JobKind::SubmissionWarning,
        )
        .await?;
        self.schedule(
            submission_timeout_job_id(turn_id),
            now + timeout,
            serde_json::json!({ "turn_id": turn_id }),
            JobKind::SubmissionTimeout,
        )
        .await?;
        Ok(turn)
    }

    /// Submit content for a pending turn, then resolve the game forward
    /// (next turn or completion).
    pub async fn submit_turn(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        player_id: i64,
        content: TurnContent,
        now: OffsetDateTime,
    ) -> Result<ResolveOutcome, DomainError> {
        let turn = turns::submit_turn(txn, turn_id, player_id, content, now).await?;
        info!(turn_id, player_id, game_id = turn.game_id, "turn submitted");

        self.cancel(submission_warning_job_id(turn_id)).await;
        self.cancel(submission_timeout_job_id(turn_id)).await;

        self.resolve_next(txn, turn.game_id, Some(turn.id), now).await
    }

    /// Decline an offered turn; the turn returns to AVAILABLE and is
    /// re-offered to the next eligible player.
    pub async fn dismiss_turn(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        player_id: i64,
        now: OffsetDateTime,
    ) -> Result<Turn, DomainError> {
        turns::dismiss_turn(txn, turn_id, player_id, now).await?;
        info!(turn_id, player_id, "turn dismissed");

        self.cancel(claim_timeout_job_id(turn_id)).await;
        self.reoffer_turn(txn, turn_id, now).await
    }

    /// Claim-timeout callback. Stale firings (already claimed, dismissed or
    /// resolved) are no-ops.
    pub async fn handle_claim_timeout(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let turn = turns::require_turn(txn, turn_id).await?;
        if turn.status != TurnStatus::Offered {
            debug!(turn_id, status = ?turn.status, "stale claim timeout, ignoring");
            return Ok(());
        }
        let holder = match turn.holder_id {
            Some(holder) => holder,
            None => {
                debug!(turn_id, "offered turn without holder, ignoring timeout");
                return Ok(());
            }
        };
        match turns::dismiss_turn(txn, turn_id, holder, now).await {
            Ok(_) => {}
            // Lost a race against a claim or dismissal; nothing left to do.
            Err(DomainError::Transition { .. }) | Err(DomainError::Conflict { .. }) => {
                debug!(turn_id, "claim timeout lost the race, ignoring");
                return Ok(());
            }
            Err(err) => return Err(err),
        }
        info!(turn_id, holder, "claim timed out, re-offering turn");
        self.notify(notify::turn_dismissed(holder, turn_id)).await?;
        self.reoffer_turn(txn, turn_id, now).await?;
        Ok(())
    }

    /// Submission-warning callback; notifies the holder while the turn is
    /// still pending, otherwise no-ops.
    pub async fn handle_submission_warning(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        _now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        let turn = turns::require_turn(txn, turn_id).await?;
        if turn.status != TurnStatus::Pending {
            debug!(turn_id, status = ?turn.status, "stale submission warning, ignoring");
            return Ok(());
        }
        if let Some(holder) = turn.holder_id {
            self.notify(notify::submission_warning(holder, turn_id)).await?;
        }
        Ok(())
    }

    /// Submission-timeout callback: skip the pending turn and resolve the
    /// game forward. Stale firings are no-ops.
    pub async fn handle_submission_timeout(
        &self,
        txn: &DatabaseTransaction,
        turn_id: i64,
        now: OffsetDateTime,
    ) -> Result<Option<ResolveOutcome>, DomainError> {
        let turn = match turns::skip_turn(txn, turn_id, now).await {
            Ok(turn) => turn,
            Err(DomainError::Transition { kind: TransitionKind::WrongState, .. }) => {
                debug!(turn_id, "stale submission timeout, ignoring");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        info!(turn_id, game_id = turn.game_id, "turn skipped on timeout");

        if let Some(holder) = turn.holder_id {
            self.notify(notify::turn_skipped(holder, turn.game_id, turn_id))
                .await?;
        }
        let outcome = self.resolve_next(txn, turn.game_id, Some(turn.id), now).await?;
        Ok(Some(outcome))
    }
}
