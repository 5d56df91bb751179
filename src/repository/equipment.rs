//! Equipment repository: CRUD plus the inventory ledger.
//!
//! The quantity counters are mutated exclusively through the ledger methods
//! in this module, always with the equipment row locked FOR UPDATE and the
//! status re-derived from the counters before the update is written.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{split_disposition, EquipmentStatus, MaintenanceAction, ReturnCondition},
        equipment::{
            CreateEquipment, Equipment, MaintenanceAdjustment, MaintenanceResult,
            UpdateEquipment,
        },
    },
};

/// Counter snapshot read under the row lock
#[derive(Debug, Clone, Copy)]
pub struct Counters {
    pub total: i32,
    pub available: i32,
    pub maintenance: i32,
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment; all units start on the shelf
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let total = data.quantity_total.unwrap_or(1);
        if total < 0 {
            return Err(AppError::InvalidQuantity(
                "quantity_total cannot be negative".to_string(),
            ));
        }
        let status = EquipmentStatus::derive(total, 0, total);
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment
                (name, equipment_type, rate_per_hour, status,
                 quantity_total, quantity_available, maintenance_quantity, notes)
            VALUES ($1, $2, $3, $4, $5, $5, 0, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.equipment_type)
        .bind(data.rate_per_hour.unwrap_or(Decimal::ZERO))
        .bind(status)
        .bind(total)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment descriptive fields.
    ///
    /// A change to quantity_total shifts quantity_available by the same
    /// delta so that units out on rental or in maintenance are untouched.
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut tx = super::begin_tx(&self.pool).await?;
        let counters = self.lock_counters(&mut tx, id).await?;

        let (total, available) = match data.quantity_total {
            Some(new_total) => {
                let delta = new_total - counters.total;
                let new_available = counters.available + delta;
                if new_available < 0 || new_total < counters.maintenance {
                    return Err(AppError::InvalidQuantity(format!(
                        "cannot shrink equipment {} below the units currently out or in maintenance",
                        id
                    )));
                }
                (new_total, new_available)
            }
            None => (counters.total, counters.available),
        };

        let status = EquipmentStatus::derive(available, counters.maintenance, total);
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment SET
                name = COALESCE($2, name),
                equipment_type = COALESCE($3, equipment_type),
                rate_per_hour = COALESCE($4, rate_per_hour),
                notes = COALESCE($5, notes),
                quantity_total = $6,
                quantity_available = $7,
                status = $8,
                modif_date = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.equipment_type)
        .bind(data.rate_per_hour)
        .bind(&data.notes)
        .bind(total)
        .bind(available)
        .bind(status)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete equipment; refused while rentals still reference it
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let referenced: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM rentals WHERE equipment_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if referenced {
            return Err(AppError::Conflict(format!(
                "Equipment {} still has rentals on record",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------
    // Inventory ledger (transaction-scoped)
    // -----------------------------------------------------------------

    /// Lock the equipment row and read its counters
    pub async fn lock_counters(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
    ) -> AppResult<Counters> {
        let row = sqlx::query(
            r#"
            SELECT quantity_total, quantity_available, maintenance_quantity
            FROM equipment WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        Ok(Counters {
            total: row.get("quantity_total"),
            available: row.get("quantity_available"),
            maintenance: row.get("maintenance_quantity"),
        })
    }

    /// Write back counters with the status re-derived
    async fn apply_counters(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
        counters: Counters,
    ) -> AppResult<()> {
        let status = EquipmentStatus::derive(counters.available, counters.maintenance, counters.total);
        sqlx::query(
            r#"
            UPDATE equipment
            SET quantity_available = $2, maintenance_quantity = $3, status = $4, modif_date = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(counters.available)
        .bind(counters.maintenance)
        .bind(status)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Reserve units for a rental. Takes the row lock, which the calling
    /// transaction then holds until commit.
    pub async fn reserve(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
        qty: i32,
    ) -> AppResult<()> {
        if qty <= 0 {
            return Err(AppError::InvalidQuantity(format!(
                "cannot reserve {} units",
                qty
            )));
        }
        let counters = self.lock_counters(tx, id).await?;
        if counters.available < qty {
            return Err(AppError::InsufficientQuantity(format!(
                "Equipment {}: {} requested, {} available",
                id, qty, counters.available
            )));
        }
        self.apply_counters(
            tx,
            id,
            Counters {
                available: counters.available - qty,
                ..counters
            },
        )
        .await
    }

    /// Put reserved units back on the shelf (rental deleted)
    pub async fn release(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
        qty: i32,
    ) -> AppResult<()> {
        let counters = self.lock_counters(tx, id).await?;
        self.apply_counters(
            tx,
            id,
            Counters {
                available: counters.available + qty,
                ..counters
            },
        )
        .await
    }

    /// Route returned units to the shelf or the maintenance pool depending
    /// on their condition
    pub async fn dispose_on_return(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
        qty: i32,
        condition: ReturnCondition,
        damaged_count: Option<i32>,
    ) -> AppResult<()> {
        let (to_available, to_maintenance) = split_disposition(condition, qty, damaged_count)?;
        let counters = self.lock_counters(tx, id).await?;
        self.apply_counters(
            tx,
            id,
            Counters {
                available: counters.available + to_available,
                maintenance: counters.maintenance + to_maintenance,
                ..counters
            },
        )
        .await
    }

    /// Overwrite the status without re-deriving it from the counters
    pub async fn set_status(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
        status: EquipmentStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE equipment SET status = $2, modif_date = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Move units between the shelf and the maintenance pool
    pub async fn adjust_maintenance(
        &self,
        id: i32,
        adjustment: &MaintenanceAdjustment,
    ) -> AppResult<MaintenanceResult> {
        let qty = adjustment.quantity;
        if qty <= 0 {
            return Err(AppError::InvalidQuantity(format!(
                "adjustment quantity must be positive, got {}",
                qty
            )));
        }

        let mut tx = super::begin_tx(&self.pool).await?;
        let counters = self.lock_counters(&mut tx, id).await?;

        let (available, maintenance) = match adjustment.action {
            MaintenanceAction::SendToMaintenance => {
                if counters.available < qty {
                    return Err(AppError::InsufficientQuantity(format!(
                        "Equipment {}: {} on the shelf, cannot send {} to maintenance",
                        id, counters.available, qty
                    )));
                }
                (counters.available - qty, counters.maintenance + qty)
            }
            MaintenanceAction::MarkAsRepaired => {
                if counters.maintenance < qty {
                    return Err(AppError::InsufficientQuantity(format!(
                        "Equipment {}: {} in maintenance, cannot repair {}",
                        id, counters.maintenance, qty
                    )));
                }
                (counters.available + qty, counters.maintenance - qty)
            }
        };

        if available + maintenance > counters.total {
            return Err(AppError::CapacityExceeded(format!(
                "Equipment {}: {} available + {} in maintenance exceeds total {}",
                id, available, maintenance, counters.total
            )));
        }

        self.apply_counters(
            &mut tx,
            id,
            Counters {
                available,
                maintenance,
                ..counters
            },
        )
        .await?;
        tx.commit().await?;

        Ok(MaintenanceResult {
            affected_count: 1,
            new_available: available,
            new_maintenance: maintenance,
        })
    }

    /// Total units currently in maintenance across all equipment (for stats)
    pub async fn count_units_in_maintenance(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(maintenance_quantity), 0)::bigint FROM equipment",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
