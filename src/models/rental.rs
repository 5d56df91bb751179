//! Rental model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{PaymentStatus, RentalStatus};

/// Rental record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rental {
    pub id: i32,
    pub client_id: i32,
    pub equipment_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub rate_per_hour: Decimal,
    /// Amount owed; grows when a return carries damage charges
    pub total_amount: Decimal,
    /// Units reserved from the equipment's available pool
    pub quantity: i32,
    pub status: RentalStatus,
    /// Derived from total_paid vs total_amount after every payment mutation
    pub payment_status: PaymentStatus,
    /// Cached sum of this rental's payment rows
    pub total_paid: Decimal,
    /// Client keeps the equipment overnight between rental days
    pub overnight_custody: bool,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Rental with joined client and equipment names, for listings
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RentalDetails {
    pub id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub equipment_id: i32,
    pub equipment_name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub rate_per_hour: Decimal,
    pub total_amount: Decimal,
    pub quantity: i32,
    pub status: RentalStatus,
    pub payment_status: PaymentStatus,
    pub total_paid: Decimal,
    pub overnight_custody: bool,
    pub notes: Option<String>,
}

/// Create rental request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRental {
    pub client_id: i32,
    pub equipment_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub rate_per_hour: Option<Decimal>,
    pub total_amount: Decimal,
    pub quantity: Option<i32>,
    pub overnight_custody: Option<bool>,
    pub notes: Option<String>,
}

/// Update rental request (plain field update, no inventory side effects)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRental {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub rate_per_hour: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub status: Option<RentalStatus>,
    pub overnight_custody: Option<bool>,
    pub notes: Option<String>,
}
