//! Activity recording service.
//!
//! Audit entries are written after the primary operation has committed, on
//! a spawned task. A failed write is logged and dropped; it never rolls
//! back or fails the operation that produced it.

use serde::Serialize;

use crate::{
    error::AppResult,
    models::activity::{ActivityLog, NewActivity},
    repository::Repository,
};

#[derive(Clone)]
pub struct ActivityService {
    repository: Repository,
}

impl ActivityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Fire-and-forget audit record
    pub fn log(
        &self,
        actor_id: i32,
        action: &str,
        entity_table: &str,
        entity_id: Option<i32>,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) {
        let entry = NewActivity {
            actor_id: Some(actor_id),
            action: action.to_string(),
            entity_table: entity_table.to_string(),
            entity_id,
            before,
            after,
        };
        let repository = self.repository.clone();
        tokio::spawn(async move {
            if let Err(e) = repository.activity.record(&entry).await {
                tracing::warn!(
                    action = %entry.action,
                    entity_table = %entry.entity_table,
                    "Failed to record activity entry: {}",
                    e
                );
            }
        });
    }

    /// Serialize an entity snapshot for the before/after columns
    pub fn snapshot<T: Serialize>(value: &T) -> Option<serde_json::Value> {
        serde_json::to_value(value).ok()
    }

    /// Most recent audit entries
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<ActivityLog>> {
        self.repository.activity.list_recent(limit).await
    }
}
