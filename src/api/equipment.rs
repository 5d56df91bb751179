//! Equipment API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, MaintenanceAdjustment, MaintenanceResult, UpdateEquipment,
    },
};

use super::{AffectedResponse, AuthenticatedUser};

/// List all equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All equipment", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Equipment>>> {
    claims.require_staff()?;
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    claims.require_staff()?;
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let equipment = state
        .services
        .equipment
        .create(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let equipment = state
        .services
        .equipment
        .update(id, &request, claims.user_id)
        .await?;
    Ok(Json(equipment))
}

/// Delete equipment
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    responses(
        (status = 200, description = "Equipment deleted", body = AffectedResponse),
        (status = 404, description = "Equipment not found"),
        (status = 409, description = "Rentals still reference this equipment")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AffectedResponse>> {
    claims.require_admin()?;
    let affected_count = state.services.equipment.delete(id, claims.user_id).await?;
    Ok(Json(AffectedResponse { affected_count }))
}

/// Move units between the shelf and the maintenance pool
#[utoipa::path(
    post,
    path = "/equipment/{id}/maintenance",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Equipment ID")
    ),
    request_body = MaintenanceAdjustment,
    responses(
        (status = 200, description = "Counters adjusted", body = MaintenanceResult),
        (status = 404, description = "Equipment not found"),
        (status = 422, description = "Not enough units in the source pool")
    )
)]
pub async fn adjust_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<MaintenanceAdjustment>,
) -> AppResult<Json<MaintenanceResult>> {
    claims.require_staff()?;
    let result = state
        .services
        .equipment
        .adjust_maintenance(id, &request, claims.user_id)
        .await?;
    Ok(Json(result))
}
