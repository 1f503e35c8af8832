//! Next-player selection.
//!
//! Pure and deterministic: identical inputs always pick the identical
//! player. Two phases over the season snapshot: hard eligibility filters
//! that may fail selection outright, then soft ranking rules that narrow the
//! pool but never to empty.

use std::collections::HashSet;

use crate::entities::configs::RepeatPolicy;
use crate::entities::turns::{ContributionKind, TurnStatus};
use crate::errors::domain::DomainError;

/// Minimal turn projection the selector needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub turn_no: i32,
    pub kind: ContributionKind,
    pub status: TurnStatus,
    pub holder_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub game_id: i64,
    /// All turns of the game, any order; the selector sorts where order
    /// matters.
    pub turns: Vec<TurnView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterMember {
    pub player_id: i64,
    /// Stable string identity; the deterministic tie-break key.
    pub external_id: String,
}

/// Season snapshot: complete roster (join order) plus every game with its
/// turns. Must be read in the same transaction as the turn creation that
/// consumes the selection, or re-validated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonView {
    pub roster: Vec<RosterMember>,
    pub games: Vec<GameView>,
}

impl SeasonView {
    fn game(&self, game_id: i64) -> Option<&GameView> {
        self.games.iter().find(|g| g.game_id == game_id)
    }
}

/// Completed/skipped turns of a game in turn-number order.
fn resolved_in_order(game: &GameView) -> Vec<&TurnView> {
    let mut resolved: Vec<&TurnView> = game
        .turns
        .iter()
        .filter(|t| t.status.is_terminal())
        .collect();
    resolved.sort_by_key(|t| t.turn_no);
    resolved
}

/// Holder of the most recent completed/skipped turn in the game, if any.
fn preceding_player(game: &GameView) -> Option<i64> {
    resolved_in_order(game).last().and_then(|t| t.holder_id)
}

/// Players `candidate` has immediately followed with a `kind` turn,
/// anywhere in the season (among resolved turns per game).
fn followed_pairing_exists(
    season: &SeasonView,
    candidate: i64,
    predecessor: i64,
    kind: ContributionKind,
) -> bool {
    for game in &season.games {
        let resolved = resolved_in_order(game);
        for pair in resolved.windows(2) {
            if pair[0].holder_id == Some(predecessor)
                && pair[1].holder_id == Some(candidate)
                && pair[1].kind == kind
            {
                return true;
            }
        }
    }
    false
}

fn assigned_count(season: &SeasonView, player_id: i64, kind: ContributionKind) -> usize {
    season
        .games
        .iter()
        .flat_map(|g| &g.turns)
        .filter(|t| t.holder_id == Some(player_id) && t.kind == kind)
        .count()
}

fn pending_count(season: &SeasonView, player_id: i64) -> usize {
    season
        .games
        .iter()
        .flat_map(|g| &g.turns)
        .filter(|t| t.holder_id == Some(player_id) && t.status == TurnStatus::Pending)
        .count()
}

/// Apply a soft rule: keep the narrowed set unless it would be empty.
fn narrow<'a, F>(candidates: Vec<&'a RosterMember>, keep: F) -> Vec<&'a RosterMember>
where
    F: Fn(&RosterMember) -> bool,
{
    let narrowed: Vec<&RosterMember> = candidates.iter().copied().filter(|m| keep(m)).collect();
    if narrowed.is_empty() {
        candidates
    } else {
        narrowed
    }
}

/// Keep only candidates minimizing `metric` (always non-empty for non-empty
/// input).
fn keep_minimum<'a, F>(candidates: Vec<&'a RosterMember>, metric: F) -> Vec<&'a RosterMember>
where
    F: Fn(&RosterMember) -> usize,
{
    let min = match candidates.iter().map(|m| metric(m)).min() {
        Some(min) => min,
        None => return candidates,
    };
    candidates
        .into_iter()
        .filter(|m| metric(m) == min)
        .collect()
}

/// Select the player to receive the next `kind` turn of `game_id`.
///
/// Hard rules (may fail with `DomainError::Selection`):
/// 1. nobody who already holds or has resolved a turn in the current game;
/// 2. nobody with a PENDING turn anywhere in the season.
///
/// Soft rules, applied in order, each skipped rather than emptying the pool:
/// repeated-pairing avoidance (under `RepeatPolicy::Strict`), per-kind
/// assignment cap at `floor(roster/2)`, minimum per-kind assignment count,
/// minimum season-wide pending count. Ties break on the lexicographically
/// smallest external id.
pub fn select_next_player(
    season: &SeasonView,
    game_id: i64,
    kind: ContributionKind,
    policy: RepeatPolicy,
) -> Result<i64, DomainError> {
    let game = season.game(game_id).ok_or_else(|| {
        DomainError::selection(format!("game {game_id} is not part of the season snapshot"))
    })?;

    // MUST 1: no repeat play within one game. Holder stays set on resolved
    // turns, so a single holder check covers offered, pending and resolved.
    let played_here: HashSet<i64> = game.turns.iter().filter_map(|t| t.holder_id).collect();

    // MUST 2: at most one outstanding pending turn per player, season-wide.
    let candidates: Vec<&RosterMember> = season
        .roster
        .iter()
        .filter(|m| !played_here.contains(&m.player_id))
        .filter(|m| pending_count(season, m.player_id) == 0)
        .collect();

    if candidates.is_empty() {
        return Err(DomainError::selection(format!(
            "no eligible players for a {kind:?} turn in game {game_id}"
        )));
    }

    // SHOULD 1: avoid repeating a pairing behind the same preceding player.
    let candidates = match (policy, preceding_player(game)) {
        (RepeatPolicy::Strict, Some(predecessor)) => narrow(candidates, |m| {
            !followed_pairing_exists(season, m.player_id, predecessor, kind)
        }),
        _ => candidates,
    };

    // SHOULD 2: cap per-kind assignments at floor(roster/2).
    let cap = season.roster.len() / 2;
    let candidates = narrow(candidates, |m| {
        assigned_count(season, m.player_id, kind) < cap
    });

    // SHOULD 3: fewest assignments of this kind.
    let candidates = keep_minimum(candidates, |m| assigned_count(season, m.player_id, kind));

    // SHOULD 4: fewest pending turns season-wide.
    let candidates = keep_minimum(candidates, |m| pending_count(season, m.player_id));

    let selected = candidates
        .into_iter()
        .min_by(|a, b| a.external_id.cmp(&b.external_id))
        .ok_or_else(|| {
            // Unreachable: soft rules never empty a non-empty pool.
            DomainError::selection(format!("candidate pool emptied for game {game_id}"))
        })?;

    Ok(selected.player_id)
}
