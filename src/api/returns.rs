//! Return processing endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::rental_return::{CreateReturn, RentalReturn, UpdateReturn},
};

use super::{AffectedResponse, AuthenticatedUser};

/// Create return response
#[derive(Serialize, ToSchema)]
pub struct ReturnCreatedResponse {
    pub id: i32,
}

/// List all returns
#[utoipa::path(
    get,
    path = "/returns",
    tag = "returns",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All returns", body = Vec<RentalReturn>)
    )
)]
pub async fn list_returns(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<RentalReturn>>> {
    claims.require_staff()?;
    let returns = state.services.returns.list().await?;
    Ok(Json(returns))
}

/// Get a return
#[utoipa::path(
    get,
    path = "/returns/{id}",
    tag = "returns",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Return ID")
    ),
    responses(
        (status = 200, description = "Return", body = RentalReturn),
        (status = 404, description = "Return not found")
    )
)]
pub async fn get_return(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalReturn>> {
    claims.require_staff()?;
    let ret = state.services.returns.get_by_id(id).await?;
    Ok(Json(ret))
}

/// Record an equipment return against a rental
#[utoipa::path(
    post,
    path = "/rentals/{id}/returns",
    tag = "returns",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    request_body = CreateReturn,
    responses(
        (status = 201, description = "Return recorded", body = ReturnCreatedResponse),
        (status = 404, description = "Rental not found"),
        (status = 422, description = "Rental not fully paid")
    )
)]
pub async fn add_return(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(rental_id): Path<i32>,
    Json(request): Json<CreateReturn>,
) -> AppResult<(StatusCode, Json<ReturnCreatedResponse>)> {
    claims.require_staff()?;
    let ret = state
        .services
        .returns
        .add(rental_id, &request, claims.user_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ReturnCreatedResponse { id: ret.id }),
    ))
}

/// Update a return; surcharge changes are mirrored onto the payment ledger
#[utoipa::path(
    put,
    path = "/returns/{id}",
    tag = "returns",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Return ID")
    ),
    request_body = UpdateReturn,
    responses(
        (status = 200, description = "Return updated", body = AffectedResponse),
        (status = 404, description = "Return not found")
    )
)]
pub async fn update_return(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateReturn>,
) -> AppResult<Json<AffectedResponse>> {
    claims.require_staff()?;
    let (_ret, affected_count) = state
        .services
        .returns
        .update(id, &request, claims.user_id)
        .await?;
    Ok(Json(AffectedResponse { affected_count }))
}

/// Delete a return, reopening the rental
#[utoipa::path(
    delete,
    path = "/returns/{id}",
    tag = "returns",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Return ID")
    ),
    responses(
        (status = 200, description = "Return deleted", body = AffectedResponse),
        (status = 404, description = "Return not found")
    )
)]
pub async fn delete_return(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AffectedResponse>> {
    claims.require_admin()?;
    let affected_count = state.services.returns.delete(id, claims.user_id).await?;
    Ok(Json(AffectedResponse { affected_count }))
}
