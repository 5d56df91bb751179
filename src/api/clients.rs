//! Client management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, CreateClient, UpdateClient},
};

use super::{AffectedResponse, AuthenticatedUser};

/// List all clients
#[utoipa::path(
    get,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All clients", body = Vec<Client>)
    )
)]
pub async fn list_clients(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Client>>> {
    claims.require_staff()?;
    let clients = state.services.clients.list().await?;
    Ok(Json(clients))
}

/// Get client by ID
#[utoipa::path(
    get,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn get_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Client>> {
    claims.require_staff()?;
    let client = state.services.clients.get_by_id(id).await?;
    Ok(Json(client))
}

/// Create a client
#[utoipa::path(
    post,
    path = "/clients",
    tag = "clients",
    security(("bearer_auth" = [])),
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let client = state
        .services
        .clients
        .create(&request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Update a client
#[utoipa::path(
    put,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Client ID")
    ),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 404, description = "Client not found")
    )
)]
pub async fn update_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    claims.require_staff()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let client = state
        .services
        .clients
        .update(id, &request, claims.user_id)
        .await?;
    Ok(Json(client))
}

/// Delete a client
#[utoipa::path(
    delete,
    path = "/clients/{id}",
    tag = "clients",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client deleted", body = AffectedResponse),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Rentals still reference this client")
    )
)]
pub async fn delete_client(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AffectedResponse>> {
    claims.require_admin()?;
    let affected_count = state.services.clients.delete(id, claims.user_id).await?;
    Ok(Json(AffectedResponse { affected_count }))
}
