//! Payments repository: the rental's payment ledger.
//!
//! A payment row is inserted and the rental's cached total_paid rewritten in
//! the same transaction, with the rental row locked, so the sum of the
//! ledger rows always matches the cached total.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{PaymentSource, PaymentType},
        payment::{CreatePayment, Payment, PaymentResult, UpdatePayment},
        rental::Rental,
    },
};

use super::rentals::RentalsRepository;

#[derive(Clone)]
pub struct PaymentsRepository {
    pool: Pool<Postgres>,
    rentals: RentalsRepository,
}

impl PaymentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            rentals: RentalsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get payment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Payment> {
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment {} not found", id)))
    }

    /// List payments for a rental, oldest first
    pub async fn list_for_rental(&self, rental_id: i32) -> AppResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE rental_id = $1 ORDER BY payment_date, id",
        )
        .bind(rental_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Record a payment against a rental
    pub async fn add(&self, rental_id: i32, data: &CreatePayment) -> AppResult<PaymentResult> {
        if data.amount <= Decimal::ZERO {
            return Err(AppError::InvalidQuantity(format!(
                "payment amount must be positive, got {}",
                data.amount
            )));
        }

        let mut tx = super::begin_tx(&self.pool).await?;
        let rental = self.rentals.lock_by_id(&mut tx, rental_id).await?;

        let (id, payment_type) = self
            .insert_in_tx(
                &mut tx,
                &rental,
                data.amount,
                data.payment_date.unwrap_or_else(Utc::now),
                data.notes.as_deref(),
                PaymentSource::Manual,
            )
            .await?;

        tx.commit().await?;
        Ok(PaymentResult { id, payment_type })
    }

    /// Insert a payment row and pull the rental's cached totals along.
    ///
    /// The caller must hold the rental row lock; `rental` is the locked
    /// snapshot. Shared by manual payments and the return processor's
    /// synthesized damage charges.
    pub async fn insert_in_tx(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        rental: &Rental,
        amount: Decimal,
        payment_date: DateTime<Utc>,
        notes: Option<&str>,
        source: PaymentSource,
    ) -> AppResult<(i32, PaymentType)> {
        let new_total_paid = rental.total_paid + amount;
        let payment_type = PaymentType::derive(new_total_paid, rental.total_amount);

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO payments (rental_id, amount, payment_type, source, payment_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(rental.id)
        .bind(amount)
        .bind(payment_type)
        .bind(source)
        .bind(payment_date)
        .bind(notes)
        .fetch_one(&mut **tx)
        .await?;

        self.rentals
            .set_payment_totals(tx, rental.id, rental.total_amount, new_total_paid)
            .await?;

        Ok((id, payment_type))
    }

    /// Direct field update. Does not touch the owning rental's totals, even
    /// when the amount changes.
    pub async fn update(&self, id: i32, data: &UpdatePayment) -> AppResult<(Payment, Payment)> {
        if let Some(amount) = data.amount {
            if amount <= Decimal::ZERO {
                return Err(AppError::InvalidQuantity(format!(
                    "payment amount must be positive, got {}",
                    amount
                )));
            }
        }

        let before = self.get_by_id(id).await?;

        let after = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments SET
                amount = COALESCE($2, amount),
                payment_date = COALESCE($3, payment_date),
                notes = COALESCE($4, notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.amount)
        .bind(data.payment_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok((before, after))
    }

    /// Delete a payment and roll the rental's cached totals back.
    ///
    /// A missing payment is a no-op with affected_count 0. The payment row is
    /// re-read under lock after the rental lock is taken, so a concurrent
    /// delete of the same row cannot roll the totals back twice.
    pub async fn delete(&self, id: i32) -> AppResult<(Option<Payment>, u64)> {
        let mut tx = super::begin_tx(&self.pool).await?;

        let rental_id = sqlx::query_scalar::<_, i32>("SELECT rental_id FROM payments WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(rental_id) = rental_id else {
            return Ok((None, 0));
        };

        // Rental row first, then the payment row, matching the lock order of
        // the return processor.
        let rental = self.rentals.lock_by_id(&mut tx, rental_id).await?;

        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(payment) = payment else {
            return Ok((None, 0));
        };

        let result = sqlx::query("DELETE FROM payments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let new_total_paid = (rental.total_paid - payment.amount).max(Decimal::ZERO);
        self.rentals
            .set_payment_totals(&mut tx, rental.id, rental.total_amount, new_total_paid)
            .await?;

        tx.commit().await?;
        Ok((Some(payment), result.rows_affected()))
    }

    /// First synthesized damage-charge payment for a rental, if any
    pub async fn find_damage_charge(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        rental_id: i32,
    ) -> AppResult<Option<Payment>> {
        let row = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE rental_id = $1 AND source = 'damage_charge'
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(rental_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row)
    }
}
