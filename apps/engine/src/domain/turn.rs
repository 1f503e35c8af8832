//! Pure turn model and its lifecycle state machine.
//!
//! The same guards are applied twice: here, on the in-memory model, and in
//! `crate::repos::turns` as conditional UPDATE filters so that a racing pair
//! of callers resolves to at most one winner. A guard failure mutates
//! nothing and is an ordinary outcome, not a fault.

use time::OffsetDateTime;

use crate::entities::turns::{self, ContributionKind, TurnStatus};
use crate::errors::domain::{DomainError, TransitionKind, ValidationKind};

/// A completed turn carries exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnContent {
    Text(String),
    Image(String),
}

impl TurnContent {
    pub fn kind(&self) -> ContributionKind {
        match self {
            TurnContent::Text(_) => ContributionKind::Writing,
            TurnContent::Image(_) => ContributionKind::Drawing,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TurnContent::Text(s) | TurnContent::Image(s) => s.trim().is_empty(),
        }
    }
}

/// Content must be non-empty and match the turn's contribution kind.
pub fn validate_content(kind: ContributionKind, content: &TurnContent) -> Result<(), DomainError> {
    if content.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyContent,
            "submitted content is empty",
        ));
    }
    if content.kind() != kind {
        return Err(DomainError::validation(
            ValidationKind::ContentKindMismatch,
            format!(
                "turn expects {:?} content, got {:?}",
                kind,
                content.kind()
            ),
        ));
    }
    Ok(())
}

/// Turn domain model, converted from `entities::turns::Model`.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub id: i64,
    pub game_id: i64,
    pub turn_no: i32,
    pub kind: ContributionKind,
    pub status: TurnStatus,
    pub holder_id: Option<i64>,
    pub text_content: Option<String>,
    pub image_url: Option<String>,
    pub previous_turn_id: Option<i64>,
    pub offered_at: Option<OffsetDateTime>,
    pub claimed_at: Option<OffsetDateTime>,
    pub completed_at: Option<OffsetDateTime>,
    pub skipped_at: Option<OffsetDateTime>,
}

impl Turn {
    fn wrong_state(&self, wanted: TurnStatus, op: &str) -> DomainError {
        DomainError::transition(
            TransitionKind::WrongState,
            format!(
                "cannot {op} turn {}: status is {:?}, expected {:?}",
                self.id, self.status, wanted
            ),
        )
    }

    fn wrong_holder(&self, player_id: i64, op: &str) -> DomainError {
        DomainError::transition(
            TransitionKind::WrongHolder,
            format!(
                "cannot {op} turn {}: player {player_id} is not the holder",
                self.id
            ),
        )
    }

    /// AVAILABLE -> OFFERED. Assigns the holder and stamps `offered_at`.
    pub fn offer(&mut self, player_id: i64, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.status != TurnStatus::Available {
            return Err(self.wrong_state(TurnStatus::Available, "offer"));
        }
        self.status = TurnStatus::Offered;
        self.holder_id = Some(player_id);
        self.offered_at = Some(now);
        Ok(())
    }

    /// OFFERED -> PENDING, only for the offered holder (or when unset).
    pub fn claim(&mut self, player_id: i64, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.status != TurnStatus::Offered {
            return Err(self.wrong_state(TurnStatus::Offered, "claim"));
        }
        if self.holder_id.is_some() && self.holder_id != Some(player_id) {
            return Err(self.wrong_holder(player_id, "claim"));
        }
        self.status = TurnStatus::Pending;
        self.holder_id = Some(player_id);
        self.claimed_at = Some(now);
        Ok(())
    }

    /// OFFERED -> AVAILABLE. Clears the holder so the turn can be re-offered.
    pub fn dismiss(&mut self, player_id: i64) -> Result<(), DomainError> {
        if self.status != TurnStatus::Offered {
            return Err(self.wrong_state(TurnStatus::Offered, "dismiss"));
        }
        if self.holder_id != Some(player_id) {
            return Err(self.wrong_holder(player_id, "dismiss"));
        }
        self.status = TurnStatus::Available;
        self.holder_id = None;
        self.offered_at = None;
        Ok(())
    }

    /// State and holder guards for `submit`, split out so the persistence
    /// layer can diagnose a missed conditional update without inventing
    /// content.
    pub fn guard_submit(&self, player_id: i64) -> Result<(), DomainError> {
        if self.status != TurnStatus::Pending {
            return Err(self.wrong_state(TurnStatus::Pending, "submit"));
        }
        if self.holder_id != Some(player_id) {
            return Err(self.wrong_holder(player_id, "submit"));
        }
        Ok(())
    }

    /// PENDING -> COMPLETED, holder only, content checked against the kind.
    pub fn submit(
        &mut self,
        player_id: i64,
        content: TurnContent,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.guard_submit(player_id)?;
        validate_content(self.kind, &content)?;
        match content {
            TurnContent::Text(text) => self.text_content = Some(text),
            TurnContent::Image(url) => self.image_url = Some(url),
        }
        self.status = TurnStatus::Completed;
        self.completed_at = Some(now);
        Ok(())
    }

    /// PENDING -> SKIPPED. The holder reference is kept for history.
    pub fn skip(&mut self, now: OffsetDateTime) -> Result<(), DomainError> {
        if self.status != TurnStatus::Pending {
            return Err(self.wrong_state(TurnStatus::Pending, "skip"));
        }
        self.status = TurnStatus::Skipped;
        self.skipped_at = Some(now);
        Ok(())
    }
}

impl From<turns::Model> for Turn {
    fn from(model: turns::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            turn_no: model.turn_no,
            kind: model.kind,
            status: model.status,
            holder_id: model.holder_id,
            text_content: model.text_content,
            image_url: model.image_url,
            previous_turn_id: model.previous_turn_id,
            offered_at: model.offered_at,
            claimed_at: model.claimed_at,
            completed_at: model.completed_at,
            skipped_at: model.skipped_at,
        }
    }
}
