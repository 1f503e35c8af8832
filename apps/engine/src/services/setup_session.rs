//! Config setup wizard session.
//!
//! A `SetupSession` carries one config draft through the wizard steps. Each
//! session owns its state and an explicit `expires_at`; callers hold the
//! session for the user driving the wizard, so an abandoned wizard expires
//! with its session instead of leaking into shared state.

use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::domain::config::{parse_pattern, RelayConfig};
use crate::domain::duration::parse_duration;
use crate::entities::configs::RepeatPolicy;
use crate::errors::domain::{DomainError, ValidationKind};

/// Draft values, filled step by step. Unset fields fall back to defaults at
/// `finish`.
#[derive(Debug, Clone, Default)]
struct Draft {
    pattern: Option<Vec<crate::entities::turns::ContributionKind>>,
    claim_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    draw_timeout: Option<Duration>,
    write_warning: Option<Duration>,
    draw_warning: Option<Duration>,
    open_duration: Option<Duration>,
    min_players: Option<u32>,
    max_players: Option<u32>,
    repeat_policy: Option<RepeatPolicy>,
    standalone_turns: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct SetupSession {
    guild_id: String,
    started_by: i64,
    expires_at: OffsetDateTime,
    draft: Draft,
}

impl SetupSession {
    pub fn start(
        guild_id: impl Into<String>,
        started_by: i64,
        now: OffsetDateTime,
        ttl: Duration,
    ) -> Self {
        let session = Self {
            guild_id: guild_id.into(),
            started_by,
            expires_at: now + ttl,
            draft: Draft::default(),
        };
        debug!(
            guild_id = %session.guild_id,
            started_by,
            "setup session started"
        );
        session
    }

    pub fn guild_id(&self) -> &str {
        &self.guild_id
    }

    pub fn started_by(&self) -> i64 {
        self.started_by
    }

    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    fn guard_live(&self, now: OffsetDateTime) -> Result<(), DomainError> {
        if now >= self.expires_at {
            return Err(DomainError::validation(
                ValidationKind::SessionExpired,
                format!("setup session for guild {} has expired", self.guild_id),
            ));
        }
        Ok(())
    }

    /// Wizard step: contribution pattern, e.g. `"writing,drawing"`.
    pub fn set_pattern(&mut self, raw: &str, now: OffsetDateTime) -> Result<(), DomainError> {
        self.guard_live(now)?;
        self.draft.pattern = Some(parse_pattern(raw)?);
        Ok(())
    }

    /// Wizard step: claim timeout in codec form, e.g. `"12h"`.
    pub fn set_claim_timeout(&mut self, raw: &str, now: OffsetDateTime) -> Result<(), DomainError> {
        self.guard_live(now)?;
        self.draft.claim_timeout = Some(parse_duration(raw)?);
        Ok(())
    }

    /// Wizard step: submission timeout and warning lead-time for writing.
    pub fn set_write_timeouts(
        &mut self,
        timeout: &str,
        warning: &str,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.guard_live(now)?;
        self.draft.write_timeout = Some(parse_duration(timeout)?);
        self.draft.write_warning = Some(parse_duration(warning)?);
        Ok(())
    }

    /// Wizard step: submission timeout and warning lead-time for drawing.
    pub fn set_draw_timeouts(
        &mut self,
        timeout: &str,
        warning: &str,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.guard_live(now)?;
        self.draft.draw_timeout = Some(parse_duration(timeout)?);
        self.draft.draw_warning = Some(parse_duration(warning)?);
        Ok(())
    }

    /// Wizard step: recruitment window.
    pub fn set_open_duration(&mut self, raw: &str, now: OffsetDateTime) -> Result<(), DomainError> {
        self.guard_live(now)?;
        self.draft.open_duration = Some(parse_duration(raw)?);
        Ok(())
    }

    /// Wizard step: roster bounds.
    pub fn set_player_bounds(
        &mut self,
        min_players: u32,
        max_players: u32,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.guard_live(now)?;
        self.draft.min_players = Some(min_players);
        self.draft.max_players = Some(max_players);
        Ok(())
    }

    pub fn set_repeat_policy(
        &mut self,
        policy: RepeatPolicy,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.guard_live(now)?;
        self.draft.repeat_policy = Some(policy);
        Ok(())
    }

    pub fn set_standalone_turns(
        &mut self,
        turns: u32,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        self.guard_live(now)?;
        self.draft.standalone_turns = Some(turns);
        Ok(())
    }

    /// Close the wizard: merge the draft over guild defaults and validate the
    /// whole config once. Returns the validated config for the caller to
    /// persist; `id` is 0 until stored.
    pub fn finish(
        self,
        defaults: &RelayConfig,
        now: OffsetDateTime,
    ) -> Result<RelayConfig, DomainError> {
        self.guard_live(now)?;
        let draft = self.draft;
        let config = RelayConfig {
            id: 0,
            guild_id: self.guild_id,
            pattern: draft.pattern.unwrap_or_else(|| defaults.pattern.clone()),
            claim_timeout: draft.claim_timeout.unwrap_or(defaults.claim_timeout),
            write_timeout: draft.write_timeout.unwrap_or(defaults.write_timeout),
            draw_timeout: draft.draw_timeout.unwrap_or(defaults.draw_timeout),
            write_warning: draft.write_warning.unwrap_or(defaults.write_warning),
            draw_warning: draft.draw_warning.unwrap_or(defaults.draw_warning),
            open_duration: draft.open_duration.unwrap_or(defaults.open_duration),
            min_players: draft.min_players.unwrap_or(defaults.min_players),
            max_players: draft.max_players.unwrap_or(defaults.max_players),
            repeat_policy: draft.repeat_policy.unwrap_or(defaults.repeat_policy),
            standalone_turns: draft.standalone_turns.unwrap_or(defaults.standalone_turns),
        };
        config.validate()?;
        Ok(config)
    }
}
