//! Payment model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{PaymentSource, PaymentType};

/// Payment ledger row
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: i32,
    pub rental_id: i32,
    pub amount: Decimal,
    /// Derived at insert time: full iff the payment settled the rental
    pub payment_type: PaymentType,
    /// Manual payment, or synthesized by the return processor
    pub source: PaymentSource,
    pub payment_date: DateTime<Utc>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Add payment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePayment {
    pub amount: Decimal,
    /// Defaults to now
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Update payment request (field update only; rental totals are untouched)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePayment {
    pub amount: Option<Decimal>,
    pub payment_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Result of adding a payment
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResult {
    pub id: i32,
    pub payment_type: PaymentType,
}
