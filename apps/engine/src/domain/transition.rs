//! Edge-triggered lifecycle events derived from before/after views.
//!
//! Services run a mutation, snapshot the lifecycle state on both sides, and
//! derive a closed set of events to feed notification construction. The enum
//! is exhaustive on purpose: adding an event forces every consumer to handle
//! it.

use crate::entities::games::GameStatus;
use crate::entities::seasons::SeasonStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeasonTransition {
    SeasonOpened,
    SeasonActivated,
    SeasonCompleted,
    SeasonCancelled,
    SeasonTerminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    GameActivated,
    GameCompleted,
    GameTerminated,
}

pub fn derive_season_transitions(
    before: SeasonStatus,
    after: SeasonStatus,
) -> Vec<SeasonTransition> {
    let mut transitions = Vec::new();
    if before == after {
        return transitions;
    }
    if after == SeasonStatus::Open {
        transitions.push(SeasonTransition::SeasonOpened);
    }
    if after == SeasonStatus::Active {
        transitions.push(SeasonTransition::SeasonActivated);
    }
    if after == SeasonStatus::Completed {
        transitions.push(SeasonTransition::SeasonCompleted);
    }
    if after == SeasonStatus::Cancelled {
        transitions.push(SeasonTransition::SeasonCancelled);
    }
    if after == SeasonStatus::Terminated {
        transitions.push(SeasonTransition::SeasonTerminated);
    }
    transitions
}

pub fn derive_game_transitions(before: GameStatus, after: GameStatus) -> Vec<GameTransition> {
    let mut transitions = Vec::new();
    if before == after {
        return transitions;
    }
    if after == GameStatus::Active {
        transitions.push(GameTransition::GameActivated);
    }
    if after == GameStatus::Completed {
        transitions.push(GameTransition::GameCompleted);
    }
    if after == GameStatus::Terminated {
        transitions.push(GameTransition::GameTerminated);
    }
    transitions
}
