//! Activity log repository: append-only audit trail

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::activity::{ActivityLog, NewActivity},
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: Pool<Postgres>,
}

impl ActivityRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append an entry. Entries are never updated or deleted.
    pub async fn record(&self, entry: &NewActivity) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (actor_id, action, entity_table, entity_id, before, after)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.actor_id)
        .bind(&entry.action)
        .bind(&entry.entity_table)
        .bind(entry.entity_id)
        .bind(&entry.before)
        .bind(&entry.after)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Most recent entries, newest first
    pub async fn list_recent(&self, limit: i64) -> AppResult<Vec<ActivityLog>> {
        let rows = sqlx::query_as::<_, ActivityLog>(
            "SELECT * FROM activity_logs ORDER BY id DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
