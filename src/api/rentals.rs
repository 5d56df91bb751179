//! Rental management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::rental::{CreateRental, Rental, RentalDetails, UpdateRental},
};

use super::{AffectedResponse, AuthenticatedUser};

/// Create rental response
#[derive(Serialize, ToSchema)]
pub struct RentalCreatedResponse {
    pub id: i32,
}

/// List all rentals
#[utoipa::path(
    get,
    path = "/rentals",
    tag = "rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All rentals", body = Vec<RentalDetails>)
    )
)]
pub async fn list_rentals(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<RentalDetails>>> {
    claims.require_staff()?;
    let rentals = state.services.rentals.list().await?;
    Ok(Json(rentals))
}

/// Get a rental
#[utoipa::path(
    get,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    responses(
        (status = 200, description = "Rental", body = Rental),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn get_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Rental>> {
    claims.require_staff()?;
    let rental = state.services.rentals.get_by_id(id).await?;
    Ok(Json(rental))
}

/// Create a new rental, reserving equipment units
#[utoipa::path(
    post,
    path = "/rentals",
    tag = "rentals",
    security(("bearer_auth" = [])),
    request_body = CreateRental,
    responses(
        (status = 201, description = "Rental created", body = RentalCreatedResponse),
        (status = 404, description = "Client or equipment not found"),
        (status = 422, description = "Not enough units available")
    )
)]
pub async fn create_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateRental>,
) -> AppResult<(StatusCode, Json<RentalCreatedResponse>)> {
    claims.require_staff()?;
    let rental = state
        .services
        .rentals
        .create(&request, claims.user_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RentalCreatedResponse { id: rental.id }),
    ))
}

/// Update rental fields
#[utoipa::path(
    put,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    request_body = UpdateRental,
    responses(
        (status = 200, description = "Rental updated", body = Rental),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn update_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateRental>,
) -> AppResult<Json<Rental>> {
    claims.require_staff()?;
    let rental = state
        .services
        .rentals
        .update(id, &request, claims.user_id)
        .await?;
    Ok(Json(rental))
}

/// Delete a rental, releasing its reserved units
#[utoipa::path(
    delete,
    path = "/rentals/{id}",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    responses(
        (status = 200, description = "Rental deleted", body = AffectedResponse),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn delete_rental(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AffectedResponse>> {
    claims.require_admin()?;
    let affected_count = state.services.rentals.delete(id, claims.user_id).await?;
    Ok(Json(AffectedResponse { affected_count }))
}

/// Get rentals for a specific client
#[utoipa::path(
    get,
    path = "/clients/{id}/rentals",
    tag = "rentals",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client's rentals", body = Vec<RentalDetails>),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client_rentals(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(client_id): Path<i32>,
) -> AppResult<Json<Vec<RentalDetails>>> {
    claims.require_staff()?;
    let rentals = state.services.rentals.list_for_client(client_id).await?;
    Ok(Json(rentals))
}
