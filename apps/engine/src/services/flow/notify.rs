//! Notification instruction construction.
//!
//! Pure constructors build the structured instructions; the service fires
//! them through the gateway with retry. Delivery formatting and transport
//! live behind the gateway.

use serde_json::json;

use super::FlowService;
use crate::domain::transition::{GameTransition, SeasonTransition};
use crate::errors::domain::DomainError;
use crate::gateways::{NotificationInstruction, NotificationKind, Recipient};

/// Guild-facing notification for a derived season lifecycle event. Opening
/// and termination are silent.
pub fn season_event(
    transition: &SeasonTransition,
    guild_id: &str,
    season_id: i64,
    game_count: usize,
    roster_len: u64,
) -> Option<NotificationInstruction> {
    match transition {
        SeasonTransition::SeasonActivated => {
            Some(season_activated(guild_id, season_id, game_count))
        }
        SeasonTransition::SeasonCancelled => {
            Some(season_cancelled(guild_id, season_id, roster_len))
        }
        SeasonTransition::SeasonCompleted => Some(season_completed(guild_id, season_id)),
        SeasonTransition::SeasonOpened | SeasonTransition::SeasonTerminated => None,
    }
}

/// Guild-facing notification for a derived game lifecycle event.
pub fn game_event(
    transition: &GameTransition,
    guild_id: &str,
    game_id: i64,
) -> Option<NotificationInstruction> {
    match transition {
        GameTransition::GameCompleted => Some(game_completed(guild_id, game_id)),
        GameTransition::GameActivated | GameTransition::GameTerminated => None,
    }
}

pub fn turn_offered(player_id: i64, game_id: i64, turn_id: i64, turn_no: i32) -> NotificationInstruction {
    NotificationInstruction {
        kind: NotificationKind::TurnOffered,
        recipient: Recipient::Player(player_id),
        payload: json!({ "game_id": game_id, "turn_id": turn_id, "turn_no": turn_no }),
    }
}

pub fn turn_dismissed(player_id: i64, turn_id: i64) -> NotificationInstruction {
    NotificationInstruction {
        kind: NotificationKind::TurnDismissed,
        recipient: Recipient::Player(player_id),
        payload: json!({ "turn_id": turn_id }),
    }
}

pub fn submission_warning(player_id: i64, turn_id: i64) -> NotificationInstruction {
    NotificationInstruction {
        kind: NotificationKind::SubmissionWarning,
        recipient: Recipient::Player(player_id),
        payload: json!({ "turn_id": turn_id }),
    }
}

pub fn turn_skipped(player_id: i64, game_id: i64, turn_id: i64) -> NotificationInstruction {
    NotificationInstruction {
        kind: NotificationKind::TurnSkipped,
        recipient: Recipient::Player(player_id),
        payload: json!({ "game_id": game_id, "turn_id": turn_id }),
    }
}

pub fn game_completed(guild_id: &str, game_id: i64) -> NotificationInstruction {
    NotificationInstruction {
        kind: NotificationKind::GameCompleted,
        recipient: Recipient::Guild(guild_id.to_string()),
        payload: json!({ "game_id": game_id }),
    }
}

pub fn season_activated(guild_id: &str, season_id: i64, game_count: usize) -> NotificationInstruction {
    NotificationInstruction {
        kind: NotificationKind::SeasonActivated,
        recipient: Recipient::Guild(guild_id.to_string()),
        payload: json!({ "season_id": season_id, "game_count": game_count }),
    }
}

pub fn season_cancelled(guild_id: &str, season_id: i64, roster_len: u64) -> NotificationInstruction {
    NotificationInstruction {
        kind: NotificationKind::SeasonCancelled,
        recipient: Recipient::Guild(guild_id.to_string()),
        payload: json!({ "season_id": season_id, "roster_len": roster_len }),
    }
}

pub fn season_completed(guild_id: &str, season_id: i64) -> NotificationInstruction {
    NotificationInstruction {
        kind: NotificationKind::SeasonCompleted,
        recipient: Recipient::Guild(guild_id.to_string()),
        payload: json!({ "season_id": season_id }),
    }
}

impl FlowService {
    pub(super) async fn notify(&self, instruction: NotificationInstruction) -> Result<(), DomainError> {
        self.retry
            .run("notify", || self.notifier.notify(instruction.clone()))
            .await
    }
}
