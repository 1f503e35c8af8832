//! Outbound notification interface.
//!
//! The engine constructs structured instructions; delivery formatting and
//! transport belong to the platform adapter implementing the trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    TurnOffered,
    TurnDismissed,
    SubmissionWarning,
    TurnSkipped,
    GameCompleted,
    SeasonActivated,
    SeasonCancelled,
    SeasonCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recipient {
    Player(i64),
    Guild(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationInstruction {
    pub kind: NotificationKind,
    pub recipient: Recipient,
    pub payload: serde_json::Value,
}

#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn notify(&self, instruction: NotificationInstruction) -> Result<(), DomainError>;
}
