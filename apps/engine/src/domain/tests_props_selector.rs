//! Property tests for next-player selection (pure domain, no DB).
//!
//! Properties tested:
//! - selection is deterministic for identical inputs
//! - a selected player is on the roster
//! - a selected player never already played in the target game
//! - a selected player never has a PENDING turn anywhere in the season

use proptest::prelude::*;

use crate::domain::selector::{select_next_player, GameView, RosterMember, SeasonView, TurnView};
use crate::domain::test_fixtures;
use crate::entities::configs::RepeatPolicy;
use crate::entities::turns::{ContributionKind, TurnStatus};

fn kind_gen() -> impl Strategy<Value = ContributionKind> {
    prop_oneof![
        Just(ContributionKind::Writing),
        Just(ContributionKind::Drawing),
    ]
}

fn status_gen() -> impl Strategy<Value = TurnStatus> {
    prop_oneof![
        Just(TurnStatus::Offered),
        Just(TurnStatus::Pending),
        Just(TurnStatus::Completed),
        Just(TurnStatus::Skipped),
    ]
}

fn policy_gen() -> impl Strategy<Value = RepeatPolicy> {
    prop_oneof![Just(RepeatPolicy::Strict), Just(RepeatPolicy::Relaxed)]
}

/// A season snapshot with 2..=6 roster members and 1..=4 games whose turn
/// holders are drawn from the roster.
fn season_gen() -> impl Strategy<Value = SeasonView> {
    (2usize..=6).prop_flat_map(|roster_len| {
        let turn_gen = (kind_gen(), status_gen(), 0usize..roster_len).prop_map(
            move |(kind, status, holder_idx)| (kind, status, holder_idx as i64 + 1),
        );
        prop::collection::vec(prop::collection::vec(turn_gen, 0..=4), 1..=4).prop_map(
            move |games| SeasonView {
                roster: (1..=roster_len as i64)
                    .map(|player_id| RosterMember {
                        player_id,
                        external_id: format!("ext-{player_id:04}"),
                    })
                    .collect(),
                games: games
                    .into_iter()
                    .enumerate()
                    .map(|(i, turns)| GameView {
                        game_id: i as i64 + 1,
                        turns: turns
                            .into_iter()
                            .enumerate()
                            .map(|(n, (kind, status, holder))| TurnView {
                                turn_no: n as i32 + 1,
                                kind,
                                status,
                                holder_id: Some(holder),
                            })
                            .collect(),
                    })
                    .collect(),
            },
        )
    })
}

proptest! {
    #![proptest_config(test_fixtures::proptest_config())]

    /// Property: identical inputs yield the identical selection result.
    #[test]
    fn prop_selection_is_deterministic(
        season in season_gen(),
        kind in kind_gen(),
        policy in policy_gen(),
    ) {
        let game_id = season.games[0].game_id;
        let first = select_next_player(&season, game_id, kind, policy);
        let second = select_next_player(&season, game_id, kind, policy);
        prop_assert_eq!(first, second);
    }

    /// Property: a successful selection respects both hard eligibility rules.
    #[test]
    fn prop_selected_player_is_eligible(
        season in season_gen(),
        kind in kind_gen(),
        policy in policy_gen(),
    ) {
        let game_id = season.games[0].game_id;
        if let Ok(picked) = select_next_player(&season, game_id, kind, policy) {
            prop_assert!(
                season.roster.iter().any(|m| m.player_id == picked),
                "selected player {} is not on the roster", picked
            );
            let game = &season.games[0];
            prop_assert!(
                game.turns.iter().all(|t| t.holder_id != Some(picked)),
                "selected player {} already played in game {}", picked, game_id
            );
            let pending = season
                .games
                .iter()
                .flat_map(|g| &g.turns)
                .filter(|t| t.holder_id == Some(picked) && t.status == TurnStatus::Pending)
                .count();
            prop_assert_eq!(pending, 0, "selected player {} has a pending turn", picked);
        }
    }
}
