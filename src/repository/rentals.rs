//! Rentals repository: rental lifecycle and its inventory coordination.
//!
//! Creating a rental reserves units from the equipment's available pool and
//! deleting it releases them, both inside one transaction so a failure on
//! either side leaves nothing half-applied.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RentalStatus,
        rental::{CreateRental, Rental, RentalDetails, UpdateRental},
    },
};

use super::equipment::EquipmentRepository;

const DETAILS_SELECT: &str = r#"
    SELECT r.id, r.client_id, c.name AS client_name,
           r.equipment_id, e.name AS equipment_name,
           r.start_date, r.end_date, r.rate_per_hour, r.total_amount,
           r.quantity, r.status, r.payment_status, r.total_paid,
           r.overnight_custody, r.notes
    FROM rentals r
    JOIN clients c ON r.client_id = c.id
    JOIN equipment e ON r.equipment_id = e.id
"#;

#[derive(Clone)]
pub struct RentalsRepository {
    pool: Pool<Postgres>,
    equipment: EquipmentRepository,
}

impl RentalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: EquipmentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get rental by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Rental> {
        sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental {} not found", id)))
    }

    /// Lock a rental row for the rest of the transaction.
    ///
    /// Every operation that reads then rewrites the rental's totals goes
    /// through here so that concurrent payment and return mutations
    /// serialize on the row.
    pub async fn lock_by_id(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
    ) -> AppResult<Rental> {
        sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental {} not found", id)))
    }

    /// List all rentals with client and equipment names
    pub async fn list(&self) -> AppResult<Vec<RentalDetails>> {
        let query = format!("{} ORDER BY r.start_date DESC", DETAILS_SELECT);
        let rows = sqlx::query_as::<_, RentalDetails>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// List rentals for one client
    pub async fn list_for_client(&self, client_id: i32) -> AppResult<Vec<RentalDetails>> {
        let query = format!(
            "{} WHERE r.client_id = $1 ORDER BY r.start_date DESC",
            DETAILS_SELECT
        );
        let rows = sqlx::query_as::<_, RentalDetails>(&query)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Create a new rental, reserving units from the equipment row
    pub async fn create(&self, data: &CreateRental) -> AppResult<Rental> {
        let quantity = data.quantity.unwrap_or(1);
        let mut tx = super::begin_tx(&self.pool).await?;

        let client_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
                .bind(data.client_id)
                .fetch_one(&mut *tx)
                .await?;
        if !client_exists {
            return Err(AppError::NotFound(format!(
                "Client {} not found",
                data.client_id
            )));
        }

        // Locks the equipment row; fails on insufficient available units
        self.equipment
            .reserve(&mut tx, data.equipment_id, quantity)
            .await?;

        // Default the hourly rate from the equipment card
        let rate = match data.rate_per_hour {
            Some(rate) => rate,
            None => {
                sqlx::query_scalar::<_, Decimal>(
                    "SELECT rate_per_hour FROM equipment WHERE id = $1",
                )
                .bind(data.equipment_id)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals
                (client_id, equipment_id, start_date, end_date, rate_per_hour,
                 total_amount, quantity, status, payment_status, total_paid,
                 overnight_custody, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'active', 'unpaid', 0, $8, $9)
            RETURNING *
            "#,
        )
        .bind(data.client_id)
        .bind(data.equipment_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(rate)
        .bind(data.total_amount)
        .bind(quantity)
        .bind(data.overnight_custody.unwrap_or(false))
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(rental)
    }

    /// Plain field update; no inventory side effects.
    ///
    /// Returns the rental before and after the update so the caller can tag
    /// a transition into `released` distinctly in the audit trail.
    pub async fn update(&self, id: i32, data: &UpdateRental) -> AppResult<(Rental, Rental)> {
        let mut tx = super::begin_tx(&self.pool).await?;
        let before = self.lock_by_id(&mut tx, id).await?;

        let after = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals SET
                start_date = COALESCE($2, start_date),
                end_date = COALESCE($3, end_date),
                rate_per_hour = COALESCE($4, rate_per_hour),
                total_amount = COALESCE($5, total_amount),
                status = COALESCE($6, status),
                overnight_custody = COALESCE($7, overnight_custody),
                notes = COALESCE($8, notes),
                modif_date = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.rate_per_hour)
        .bind(data.total_amount)
        .bind(data.status)
        .bind(data.overnight_custody)
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((before, after))
    }

    /// Delete a rental and put its reserved units back on the shelf.
    ///
    /// A returned rental's units already went back through the return
    /// processor, so only rentals still holding a reservation release.
    /// The rental's payments and returns go with it (ON DELETE CASCADE).
    pub async fn delete(&self, id: i32) -> AppResult<(Rental, u64)> {
        let mut tx = super::begin_tx(&self.pool).await?;
        let rental = self.lock_by_id(&mut tx, id).await?;

        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if rental.status != RentalStatus::Returned {
            self.equipment
                .release(&mut tx, rental.equipment_id, rental.quantity)
                .await?;
        }

        tx.commit().await?;
        Ok((rental, result.rows_affected()))
    }

    /// Flip active rentals past their end date to overdue
    pub async fn mark_overdue_sweep(&self) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE rentals SET status = 'overdue', modif_date = $1
            WHERE status = 'active' AND end_date IS NOT NULL AND end_date < $1
            "#,
        )
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Count active rentals
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rentals WHERE status = 'active'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count overdue rentals, including active ones already past their end date
    pub async fn count_overdue(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM rentals
            WHERE status = 'overdue'
               OR (status = 'active' AND end_date IS NOT NULL AND end_date < NOW())
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Sum of unpaid balances across open rentals (for stats)
    pub async fn outstanding_balance(&self) -> AppResult<Decimal> {
        let sum: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_amount - total_paid), 0)
            FROM rentals
            WHERE payment_status != 'paid'
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(sum)
    }

    /// Rewrite the rental's money columns with the payment status re-derived.
    ///
    /// Single write path for total_amount / total_paid so the derivation
    /// rule is applied on every mutation.
    pub async fn set_payment_totals(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
        total_amount: Decimal,
        total_paid: Decimal,
    ) -> AppResult<()> {
        let payment_status =
            crate::models::enums::PaymentStatus::derive(total_paid, total_amount);
        sqlx::query(
            r#"
            UPDATE rentals
            SET total_amount = $2, total_paid = $3, payment_status = $4, modif_date = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(total_amount)
        .bind(total_paid)
        .bind(payment_status)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Update the rental's status only (used by the return processor)
    pub async fn set_status(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
        status: RentalStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE rentals SET status = $2, modif_date = $3 WHERE id = $1")
            .bind(id)
            .bind(status)
            .bind(Utc::now())
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
