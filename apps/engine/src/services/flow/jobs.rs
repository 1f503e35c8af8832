//! Scheduled-job vocabulary and gateway plumbing.
//!
//! Job ids are derived from entity id plus purpose, so re-scheduling and
//! cancellation are idempotent and collision-free. Scheduling failures are
//! retried through the shared policy; cancellation is best-effort because a
//! late-firing callback is already a guarded no-op at the handler.

use time::OffsetDateTime;
use tracing::warn;

use super::FlowService;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    ClaimTimeout,
    SubmissionWarning,
    SubmissionTimeout,
    SeasonOpenExpiry,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::ClaimTimeout => "claim-timeout",
            JobKind::SubmissionWarning => "submission-warning",
            JobKind::SubmissionTimeout => "submission-timeout",
            JobKind::SeasonOpenExpiry => "season-open-expiry",
        }
    }
}

pub fn claim_timeout_job_id(turn_id: i64) -> String {
    format!("turn-claim-timeout-{turn_id}")
}

pub fn submission_warning_job_id(turn_id: i64) -> String {
    format!("turn-submission-warning-{turn_id}")
}

pub fn submission_timeout_job_id(turn_id: i64) -> String {
    format!("turn-submission-timeout-{turn_id}")
}

pub fn season_open_expiry_job_id(season_id: i64) -> String {
    format!("season-open-expiry-{season_id}")
}

impl FlowService {
    pub(super) async fn schedule(
        &self,
        id: String,
        fire_at: OffsetDateTime,
        payload: serde_json::Value,
        kind: JobKind,
    ) -> Result<(), DomainError> {
        self.retry
            .run("schedule_job", || {
                self.scheduler
                    .schedule_job(&id, fire_at, payload.clone(), kind.as_str())
            })
            .await?;
        Ok(())
    }

    /// Best-effort cancellation: a failure is logged, never propagated,
    /// because the corresponding callback no-ops against current state.
    pub(super) async fn cancel(&self, id: String) {
        let result = self
            .retry
            .run("cancel_job", || self.scheduler.cancel_job(&id))
            .await;
        if let Err(err) = result {
            warn!(job_id = %id, error = %err, "failed to cancel scheduled job");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_ids_are_deterministic_and_distinct() {
        assert_eq!(claim_timeout_job_id(7), "turn-claim-timeout-7");
        assert_eq!(claim_timeout_job_id(7), claim_timeout_job_id(7));
        let ids = [
            claim_timeout_job_id(7),
            submission_warning_job_id(7),
            submission_timeout_job_id(7),
            season_open_expiry_job_id(7),
        ];
        for (i, a) in ids.iter().enumerate() {
            for b in ids.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
