//! Equipment model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{EquipmentStatus, MaintenanceAction};

/// Equipment record with its inventory counters
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Equipment name / description
    pub name: String,
    /// Free-form category (generator, scaffold, drill, ...)
    pub equipment_type: Option<String>,
    pub rate_per_hour: Decimal,
    /// Derived from the counters after every mutation
    pub status: EquipmentStatus,
    /// Total units owned
    pub quantity_total: i32,
    /// Units on the shelf, ready to rent
    pub quantity_available: i32,
    /// Units under maintenance or pending write-off
    pub maintenance_quantity: i32,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub equipment_type: Option<String>,
    pub rate_per_hour: Option<Decimal>,
    #[validate(range(min = 0))]
    pub quantity_total: Option<i32>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub equipment_type: Option<String>,
    pub rate_per_hour: Option<Decimal>,
    #[validate(range(min = 0))]
    pub quantity_total: Option<i32>,
    pub notes: Option<String>,
}

/// Maintenance adjustment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct MaintenanceAdjustment {
    pub quantity: i32,
    pub action: MaintenanceAction,
}

/// Result of a maintenance adjustment
#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceResult {
    pub affected_count: u64,
    pub new_available: i32,
    pub new_maintenance: i32,
}
