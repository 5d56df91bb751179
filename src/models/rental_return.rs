//! Equipment return model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::ReturnCondition;

/// Equipment return record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct RentalReturn {
    pub id: i32,
    pub rental_id: i32,
    pub return_date: DateTime<Utc>,
    pub condition: ReturnCondition,
    pub damage_description: Option<String>,
    /// Surcharge billed on top of the rental amount; carried by a
    /// synthesized damage-charge payment
    pub additional_charges: Decimal,
    /// How many of the returned units were damaged; defaults to all of them
    pub damaged_count: Option<i32>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Record return request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReturn {
    /// Defaults to now
    pub return_date: Option<DateTime<Utc>>,
    pub condition: ReturnCondition,
    pub damage_description: Option<String>,
    pub additional_charges: Option<Decimal>,
    pub damaged_count: Option<i32>,
    pub notes: Option<String>,
}

/// Update return request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReturn {
    pub return_date: Option<DateTime<Utc>>,
    pub damage_description: Option<String>,
    pub additional_charges: Option<Decimal>,
    pub notes: Option<String>,
}
