//! Shared domain enums and the derivation rules for status fields

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Equipment availability status, always derived from the quantity counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "equipment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Available,
    Rented,
    Maintenance,
}

impl EquipmentStatus {
    /// Derive the status from the current counters.
    ///
    /// Any unit on the shelf makes the equipment available; when every unit
    /// is in the maintenance pool the whole line is in maintenance;
    /// otherwise the remaining units are out on rental.
    pub fn derive(available: i32, maintenance: i32, total: i32) -> Self {
        if available > 0 {
            EquipmentStatus::Available
        } else if maintenance >= total {
            EquipmentStatus::Maintenance
        } else {
            EquipmentStatus::Rented
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::Rented => "rented",
            EquipmentStatus::Maintenance => "maintenance",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// RentalStatus
// ---------------------------------------------------------------------------

/// Rental lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "rental_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Active,
    Returned,
    Overdue,
    Released,
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RentalStatus::Active => "active",
            RentalStatus::Returned => "returned",
            RentalStatus::Overdue => "overdue",
            RentalStatus::Released => "released",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// PaymentStatus
// ---------------------------------------------------------------------------

/// Rental payment status, always derived from total_paid vs total_amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    /// Derive the payment status from the amount paid so far.
    pub fn derive(total_paid: Decimal, total_amount: Decimal) -> Self {
        if total_paid >= total_amount {
            PaymentStatus::Paid
        } else if total_paid > Decimal::ZERO {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Unpaid
        }
    }
}

// ---------------------------------------------------------------------------
// PaymentType
// ---------------------------------------------------------------------------

/// Whether a payment settled the rental in full, derived at insert time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Full,
    Partial,
}

impl PaymentType {
    /// A payment is "full" when it brings the running total up to the amount
    /// owed; the caller never chooses this.
    pub fn derive(new_total_paid: Decimal, total_amount: Decimal) -> Self {
        if new_total_paid >= total_amount {
            PaymentType::Full
        } else {
            PaymentType::Partial
        }
    }
}

// ---------------------------------------------------------------------------
// PaymentSource
// ---------------------------------------------------------------------------

/// Origin of a payment row: entered by staff, or synthesized by the return
/// processor to carry a damage surcharge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_source", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    Manual,
    DamageCharge,
}

// ---------------------------------------------------------------------------
// ReturnCondition
// ---------------------------------------------------------------------------

/// Condition of equipment on return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "return_condition", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReturnCondition {
    Good,
    Damaged,
    Lost,
}

impl std::fmt::Display for ReturnCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ReturnCondition::Good => "good",
            ReturnCondition::Damaged => "damaged",
            ReturnCondition::Lost => "lost",
        };
        write!(f, "{}", label)
    }
}

/// Split returned units between the shelf and the maintenance pool.
///
/// Returns `(to_available, to_maintenance)`. Lost units go to the
/// maintenance pool as well: they stay on the books for reconciliation
/// instead of being written off from the total.
pub fn split_disposition(
    condition: ReturnCondition,
    quantity: i32,
    damaged_count: Option<i32>,
) -> AppResult<(i32, i32)> {
    match condition {
        ReturnCondition::Good => Ok((quantity, 0)),
        ReturnCondition::Damaged => {
            let damaged = damaged_count.unwrap_or(quantity);
            if damaged < 0 || damaged > quantity {
                return Err(AppError::InvalidQuantity(format!(
                    "damaged count {} out of range for {} returned units",
                    damaged, quantity
                )));
            }
            Ok((quantity - damaged, damaged))
        }
        ReturnCondition::Lost => Ok((0, quantity)),
    }
}

// ---------------------------------------------------------------------------
// MaintenanceAction
// ---------------------------------------------------------------------------

/// Direction of a maintenance adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceAction {
    SendToMaintenance,
    MarkAsRepaired,
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Staff account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Staff,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::Admin => "admin",
            UserRole::Staff => "staff",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_equipment_status_available_wins() {
        assert_eq!(EquipmentStatus::derive(1, 4, 5), EquipmentStatus::Available);
    }

    #[test]
    fn test_equipment_status_all_in_maintenance() {
        assert_eq!(EquipmentStatus::derive(0, 5, 5), EquipmentStatus::Maintenance);
    }

    #[test]
    fn test_equipment_status_rented_out() {
        assert_eq!(EquipmentStatus::derive(0, 1, 5), EquipmentStatus::Rented);
        assert_eq!(EquipmentStatus::derive(0, 0, 5), EquipmentStatus::Rented);
    }

    #[test]
    fn test_payment_status_derivation() {
        assert_eq!(PaymentStatus::derive(dec(0), dec(100)), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::derive(dec(40), dec(100)), PaymentStatus::Partial);
        assert_eq!(PaymentStatus::derive(dec(100), dec(100)), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::derive(dec(150), dec(100)), PaymentStatus::Paid);
    }

    #[test]
    fn test_payment_type_derivation() {
        assert_eq!(PaymentType::derive(dec(100), dec(100)), PaymentType::Full);
        assert_eq!(PaymentType::derive(dec(99), dec(100)), PaymentType::Partial);
    }

    #[test]
    fn test_disposition_good() {
        assert_eq!(split_disposition(ReturnCondition::Good, 3, None).unwrap(), (3, 0));
    }

    #[test]
    fn test_disposition_damaged_partial() {
        assert_eq!(
            split_disposition(ReturnCondition::Damaged, 3, Some(1)).unwrap(),
            (2, 1)
        );
    }

    #[test]
    fn test_disposition_damaged_defaults_to_all() {
        assert_eq!(
            split_disposition(ReturnCondition::Damaged, 3, None).unwrap(),
            (0, 3)
        );
    }

    #[test]
    fn test_disposition_damaged_count_exceeds_quantity() {
        assert!(split_disposition(ReturnCondition::Damaged, 2, Some(3)).is_err());
    }

    #[test]
    fn test_disposition_lost_goes_to_maintenance() {
        assert_eq!(split_disposition(ReturnCondition::Lost, 2, None).unwrap(), (0, 2));
    }
}
