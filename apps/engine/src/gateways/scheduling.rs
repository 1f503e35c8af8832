//! Time-based job scheduler interface.
//!
//! Job ids are derived deterministically from entity id plus purpose (see
//! `crate::services::flow::jobs`) so re-scheduling and cancellation are
//! idempotent. Cancellation is best-effort: a late-firing, already-irrelevant
//! callback must be a no-op at the receiving service, guarded by the same
//! state checks as any other trigger.

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::errors::domain::DomainError;

#[async_trait]
pub trait SchedulingGateway: Send + Sync {
    /// Returns true if the job was (re)scheduled.
    async fn schedule_job(
        &self,
        id: &str,
        fire_at: OffsetDateTime,
        payload: serde_json::Value,
        kind: &str,
    ) -> Result<bool, DomainError>;

    /// Returns true if a scheduled job was found and cancelled.
    async fn cancel_job(&self, id: &str) -> Result<bool, DomainError>;
}
