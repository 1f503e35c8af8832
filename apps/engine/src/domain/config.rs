//! Validated relay configuration.
//!
//! `RelayConfig` is the parsed, bounds-checked form of a stored
//! `entities::configs::Model` row. All duration fields are parsed through the
//! duration codec; validation failures carry a user-facing reason.

use time::Duration;

use crate::domain::duration::parse_duration;
use crate::entities::configs::{self, RepeatPolicy};
use crate::entities::turns::ContributionKind;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub id: i64,
    pub guild_id: String,
    /// Ordered contribution cycle; turn N gets `pattern[(N - 1) % len]`.
    pub pattern: Vec<ContributionKind>,
    pub claim_timeout: Duration,
    pub write_timeout: Duration,
    pub draw_timeout: Duration,
    pub write_warning: Duration,
    pub draw_warning: Duration,
    pub open_duration: Duration,
    pub min_players: u32,
    pub max_players: u32,
    pub repeat_policy: RepeatPolicy,
    /// Turn-count completion target for standalone (non-season) games.
    pub standalone_turns: u32,
}

pub fn parse_pattern(raw: &str) -> Result<Vec<ContributionKind>, DomainError> {
    let mut pattern = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        match part.to_ascii_lowercase().as_str() {
            "writing" => pattern.push(ContributionKind::Writing),
            "drawing" => pattern.push(ContributionKind::Drawing),
            "" => {}
            other => {
                return Err(DomainError::validation(
                    ValidationKind::Other("BAD_PATTERN".into()),
                    format!("unknown contribution kind \"{other}\"; use writing or drawing"),
                ))
            }
        }
    }
    if pattern.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::EmptyPattern,
            "contribution pattern must name at least one kind",
        ));
    }
    Ok(pattern)
}

impl RelayConfig {
    pub fn from_model(model: &configs::Model) -> Result<Self, DomainError> {
        let config = Self {
            id: model.id,
            guild_id: model.guild_id.clone(),
            pattern: parse_pattern(&model.pattern)?,
            claim_timeout: parse_duration(&model.claim_timeout)?,
            write_timeout: parse_duration(&model.write_timeout)?,
            draw_timeout: parse_duration(&model.draw_timeout)?,
            write_warning: parse_duration(&model.write_warning)?,
            draw_warning: parse_duration(&model.draw_warning)?,
            open_duration: parse_duration(&model.open_duration)?,
            min_players: u32::try_from(model.min_players.max(0)).unwrap_or(0),
            max_players: u32::try_from(model.max_players.max(0)).unwrap_or(0),
            repeat_policy: model.repeat_policy,
            standalone_turns: u32::try_from(model.standalone_turns.max(0)).unwrap_or(0),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_players < 2 {
            return Err(DomainError::validation(
                ValidationKind::RosterBounds,
                format!("min players must be at least 2, got {}", self.min_players),
            ));
        }
        if self.max_players < self.min_players {
            return Err(DomainError::validation(
                ValidationKind::RosterBounds,
                format!(
                    "max players ({}) must not be below min players ({})",
                    self.max_players, self.min_players
                ),
            ));
        }
        if self.pattern.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyPattern,
                "contribution pattern must name at least one kind",
            ));
        }
        for (name, d) in [
            ("claim timeout", self.claim_timeout),
            ("write timeout", self.write_timeout),
            ("draw timeout", self.draw_timeout),
            ("open duration", self.open_duration),
        ] {
            if d <= Duration::ZERO {
                return Err(DomainError::validation(
                    ValidationKind::BadDuration,
                    format!("{name} must be positive"),
                ));
            }
        }
        if self.write_warning >= self.write_timeout || self.draw_warning >= self.draw_timeout {
            return Err(DomainError::validation(
                ValidationKind::BadDuration,
                "warning lead-time must be shorter than its submission timeout",
            ));
        }
        if self.standalone_turns == 0 {
            return Err(DomainError::validation(
                ValidationKind::Other("BAD_TURN_COUNT".into()),
                "standalone turn count must be positive",
            ));
        }
        Ok(())
    }

    /// Contribution kind for a 1-based turn number, wrapping over the pattern.
    pub fn kind_at(&self, turn_no: i32) -> ContributionKind {
        debug_assert!(turn_no >= 1, "turn_no is 1-based");
        let idx = (turn_no.max(1) as usize - 1) % self.pattern.len();
        self.pattern[idx]
    }

    pub fn submit_timeout(&self, kind: ContributionKind) -> Duration {
        match kind {
            ContributionKind::Writing => self.write_timeout,
            ContributionKind::Drawing => self.draw_timeout,
        }
    }

    pub fn submit_warning(&self, kind: ContributionKind) -> Duration {
        match kind {
            ContributionKind::Writing => self.write_warning,
            ContributionKind::Drawing => self.draw_warning,
        }
    }
}
