//! Activity log endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{error::AppResult, models::activity::ActivityLog};

use super::AuthenticatedUser;

#[derive(Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

/// List recent activity log entries, newest first
#[utoipa::path(
    get,
    path = "/activity",
    tag = "activity",
    security(("bearer_auth" = [])),
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of entries (default 100)")
    ),
    responses(
        (status = 200, description = "Recent activity", body = Vec<ActivityLog>)
    )
)]
pub async fn list_activity(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<ActivityLog>>> {
    claims.require_staff()?;
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let entries = state.services.activity.list_recent(limit).await?;
    Ok(Json(entries))
}
