//! Recording gateway doubles for lifecycle tests.

use std::sync::Mutex;

use async_trait::async_trait;
use engine::errors::domain::DomainError;
use engine::gateways::{
    NotificationGateway, NotificationInstruction, NotificationKind, SchedulingGateway,
};
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledJob {
    pub id: String,
    pub fire_at: OffsetDateTime,
    pub payload: serde_json::Value,
    pub kind: String,
}

#[derive(Default)]
pub struct RecordingScheduler {
    pub scheduled: Mutex<Vec<ScheduledJob>>,
    pub cancelled: Mutex<Vec<String>>,
}

impl RecordingScheduler {
    pub fn scheduled_ids(&self) -> Vec<String> {
        self.scheduled
            .lock()
            .unwrap()
            .iter()
            .map(|j| j.id.clone())
            .collect()
    }

    pub fn cancelled_ids(&self) -> Vec<String> {
        self.cancelled.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchedulingGateway for RecordingScheduler {
    async fn schedule_job(
        &self,
        id: &str,
        fire_at: OffsetDateTime,
        payload: serde_json::Value,
        kind: &str,
    ) -> Result<bool, DomainError> {
        self.scheduled.lock().unwrap().push(ScheduledJob {
            id: id.to_string(),
            fire_at,
            payload,
            kind: kind.to_string(),
        });
        Ok(true)
    }

    async fn cancel_job(&self, id: &str) -> Result<bool, DomainError> {
        self.cancelled.lock().unwrap().push(id.to_string());
        Ok(true)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<NotificationInstruction>>,
}

impl RecordingNotifier {
    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.sent.lock().unwrap().iter().map(|i| i.kind).collect()
    }
}

#[async_trait]
impl NotificationGateway for RecordingNotifier {
    async fn notify(&self, instruction: NotificationInstruction) -> Result<(), DomainError> {
        self.sent.lock().unwrap().push(instruction);
        Ok(())
    }
}
