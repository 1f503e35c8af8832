//! Relay flow service.
//!
//! One service owns the season/game/turn lifecycles; its implementation is
//! split across focused files. All mutations run inside a caller-provided
//! transaction; gateway calls go through the shared retry policy.

mod game_lifecycle;
mod jobs;
mod notify;
mod season_lifecycle;
mod turn_actions;

use std::sync::Arc;

use crate::gateways::{NotificationGateway, SchedulingGateway};
use crate::infra::retry::RetryPolicy;

pub use game_lifecycle::{CompletionPolicy, ResolveOutcome};
pub use jobs::JobKind;
pub use season_lifecycle::JoinOutcome;

pub struct FlowService {
    scheduler: Arc<dyn SchedulingGateway>,
    notifier: Arc<dyn NotificationGateway>,
    retry: RetryPolicy,
}

impl FlowService {
    pub fn new(
        scheduler: Arc<dyn SchedulingGateway>,
        notifier: Arc<dyn NotificationGateway>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            scheduler,
            notifier,
            retry,
        }
    }
}
