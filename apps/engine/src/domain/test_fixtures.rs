//! Shared builders for domain unit tests.

use proptest::test_runner::Config;
use time::{Duration, OffsetDateTime};

use crate::domain::config::RelayConfig;
use crate::domain::selector::{GameView, RosterMember, SeasonView, TurnView};
use crate::domain::turn::Turn;
use crate::entities::configs::RepeatPolicy;
use crate::entities::turns::{ContributionKind, TurnStatus};

pub fn proptest_config() -> Config {
    Config {
        cases: 256,
        ..Config::default()
    }
}

pub fn now() -> OffsetDateTime {
    time::macros::datetime!(2025-06-01 12:00 UTC)
}

pub fn config() -> RelayConfig {
    RelayConfig {
        id: 1,
        guild_id: "guild-1".into(),
        pattern: vec![ContributionKind::Writing, ContributionKind::Drawing],
        claim_timeout: Duration::hours(12),
        write_timeout: Duration::days(2),
        draw_timeout: Duration::days(3),
        write_warning: Duration::hours(6),
        draw_warning: Duration::hours(6),
        open_duration: Duration::days(7),
        min_players: 4,
        max_players: 12,
        repeat_policy: RepeatPolicy::Strict,
        standalone_turns: 10,
    }
}

pub fn member(player_id: i64) -> RosterMember {
    RosterMember {
        player_id,
        external_id: format!("ext-{player_id:04}"),
    }
}

pub fn roster(ids: &[i64]) -> Vec<RosterMember> {
    ids.iter().copied().map(member).collect()
}

pub fn turn_view(
    turn_no: i32,
    kind: ContributionKind,
    status: TurnStatus,
    holder_id: Option<i64>,
) -> TurnView {
    TurnView {
        turn_no,
        kind,
        status,
        holder_id,
    }
}

pub fn game(game_id: i64, turns: Vec<TurnView>) -> GameView {
    GameView { game_id, turns }
}

pub fn season(roster_ids: &[i64], games: Vec<GameView>) -> SeasonView {
    SeasonView {
        roster: roster(roster_ids),
        games,
    }
}

pub fn fresh_turn(id: i64, kind: ContributionKind, status: TurnStatus) -> Turn {
    Turn {
        id,
        game_id: 1,
        turn_no: 1,
        kind,
        status,
        holder_id: None,
        text_content: None,
        image_url: None,
        previous_turn_id: None,
        offered_at: None,
        claimed_at: None,
        completed_at: None,
        skipped_at: None,
    }
}
