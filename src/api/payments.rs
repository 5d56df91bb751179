//! Payment ledger endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::payment::{CreatePayment, Payment, PaymentResult, UpdatePayment},
};

use super::{AffectedResponse, AuthenticatedUser};

/// Payments recorded against a rental
#[utoipa::path(
    get,
    path = "/rentals/{id}/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    responses(
        (status = 200, description = "Rental's payments", body = Vec<Payment>),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn list_rental_payments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(rental_id): Path<i32>,
) -> AppResult<Json<Vec<Payment>>> {
    claims.require_staff()?;
    let payments = state.services.payments.list_for_rental(rental_id).await?;
    Ok(Json(payments))
}

/// Record a payment against a rental
#[utoipa::path(
    post,
    path = "/rentals/{id}/payments",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Rental ID")
    ),
    request_body = CreatePayment,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentResult),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "Rental not found")
    )
)]
pub async fn add_payment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(rental_id): Path<i32>,
    Json(request): Json<CreatePayment>,
) -> AppResult<(StatusCode, Json<PaymentResult>)> {
    claims.require_staff()?;
    let result = state
        .services
        .payments
        .add(rental_id, &request, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Update payment fields
#[utoipa::path(
    put,
    path = "/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    request_body = UpdatePayment,
    responses(
        (status = 200, description = "Payment updated", body = Payment),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn update_payment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdatePayment>,
) -> AppResult<Json<Payment>> {
    claims.require_staff()?;
    let payment = state
        .services
        .payments
        .update(id, &request, claims.user_id)
        .await?;
    Ok(Json(payment))
}

/// Delete a payment, rolling the rental's totals back
#[utoipa::path(
    delete,
    path = "/payments/{id}",
    tag = "payments",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment deleted (affected_count 0 when absent)", body = AffectedResponse)
    )
)]
pub async fn delete_payment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<AffectedResponse>> {
    claims.require_admin()?;
    let affected_count = state.services.payments.delete(id, claims.user_id).await?;
    Ok(Json(AffectedResponse { affected_count }))
}
