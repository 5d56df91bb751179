//! Activity log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Append-only audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivityLog {
    pub id: i64,
    pub actor_id: Option<i32>,
    /// Verb: Create, Update, Delete, Release, ...
    pub action: String,
    pub entity_table: String,
    pub entity_id: Option<i32>,
    /// Entity snapshot before the mutation
    pub before: Option<serde_json::Value>,
    /// Entity snapshot after the mutation
    pub after: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Entry submitted by the services after a committed mutation
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub actor_id: Option<i32>,
    pub action: String,
    pub entity_table: String,
    pub entity_id: Option<i32>,
    pub before: Option<serde_json::Value>,
    pub after: Option<serde_json::Value>,
}
