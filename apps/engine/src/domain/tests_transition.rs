use crate::domain::transition::{
    derive_game_transitions, derive_season_transitions, GameTransition, SeasonTransition,
};
use crate::entities::games::GameStatus;
use crate::entities::seasons::SeasonStatus;

#[test]
fn no_transition_when_status_is_unchanged() {
    assert!(derive_season_transitions(SeasonStatus::Open, SeasonStatus::Open).is_empty());
    assert!(derive_game_transitions(GameStatus::Active, GameStatus::Active).is_empty());
}

#[test]
fn season_edges_map_to_events() {
    assert_eq!(
        derive_season_transitions(SeasonStatus::Setup, SeasonStatus::Open),
        vec![SeasonTransition::SeasonOpened]
    );
    assert_eq!(
        derive_season_transitions(SeasonStatus::Open, SeasonStatus::Active),
        vec![SeasonTransition::SeasonActivated]
    );
    assert_eq!(
        derive_season_transitions(SeasonStatus::Active, SeasonStatus::Completed),
        vec![SeasonTransition::SeasonCompleted]
    );
    assert_eq!(
        derive_season_transitions(SeasonStatus::Open, SeasonStatus::Cancelled),
        vec![SeasonTransition::SeasonCancelled]
    );
    assert_eq!(
        derive_season_transitions(SeasonStatus::Active, SeasonStatus::Terminated),
        vec![SeasonTransition::SeasonTerminated]
    );
}

#[test]
fn game_edges_map_to_events() {
    assert_eq!(
        derive_game_transitions(GameStatus::Setup, GameStatus::Active),
        vec![GameTransition::GameActivated]
    );
    assert_eq!(
        derive_game_transitions(GameStatus::Active, GameStatus::Completed),
        vec![GameTransition::GameCompleted]
    );
    assert_eq!(
        derive_game_transitions(GameStatus::Active, GameStatus::Terminated),
        vec![GameTransition::GameTerminated]
    );
}
