//! Returns repository: records equipment coming back, reconciles the
//! inventory counters, and carries damage surcharges into the payment
//! ledger.
//!
//! A damage surcharge raises the rental's total_amount and is immediately
//! recorded as paid through a synthesized payment row tagged
//! source = damage_charge, so later edits and deletions of the return can
//! find and adjust it without guessing.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, PaymentSource, PaymentType, RentalStatus, ReturnCondition},
        rental_return::{CreateReturn, RentalReturn, UpdateReturn},
    },
};

use super::{
    equipment::EquipmentRepository, payments::PaymentsRepository, rentals::RentalsRepository,
};

#[derive(Clone)]
pub struct ReturnsRepository {
    pool: Pool<Postgres>,
    rentals: RentalsRepository,
    equipment: EquipmentRepository,
    payments: PaymentsRepository,
}

impl ReturnsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            rentals: RentalsRepository::new(pool.clone()),
            equipment: EquipmentRepository::new(pool.clone()),
            payments: PaymentsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Get return by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<RentalReturn> {
        sqlx::query_as::<_, RentalReturn>("SELECT * FROM returns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Return {} not found", id)))
    }

    /// List all returns, most recent first
    pub async fn list(&self) -> AppResult<Vec<RentalReturn>> {
        let rows = sqlx::query_as::<_, RentalReturn>(
            "SELECT * FROM returns ORDER BY return_date DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn lock_by_id(
        &self,
        tx: &mut Transaction<'static, Postgres>,
        id: i32,
    ) -> AppResult<RentalReturn> {
        sqlx::query_as::<_, RentalReturn>("SELECT * FROM returns WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Return {} not found", id)))
    }

    /// Record an equipment return.
    ///
    /// An unpaid rental blocks the return unless the equipment came back
    /// damaged: the damage surcharge may itself be what settles the bill.
    pub async fn add(&self, rental_id: i32, data: &CreateReturn) -> AppResult<RentalReturn> {
        let charges = data.additional_charges.unwrap_or(Decimal::ZERO);
        if charges < Decimal::ZERO {
            return Err(AppError::InvalidQuantity(format!(
                "additional charges cannot be negative, got {}",
                charges
            )));
        }

        let mut tx = super::begin_tx(&self.pool).await?;
        let rental = self.rentals.lock_by_id(&mut tx, rental_id).await?;

        if rental.payment_status != crate::models::enums::PaymentStatus::Paid
            && data.condition != ReturnCondition::Damaged
        {
            return Err(AppError::PaymentIncomplete(format!(
                "Rental {} is not fully paid; settle the balance before the return",
                rental_id
            )));
        }

        let return_date = data.return_date.unwrap_or_else(Utc::now);
        let ret = sqlx::query_as::<_, RentalReturn>(
            r#"
            INSERT INTO returns
                (rental_id, return_date, condition, damage_description,
                 additional_charges, damaged_count, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(rental_id)
        .bind(return_date)
        .bind(data.condition)
        .bind(&data.damage_description)
        .bind(charges)
        .bind(data.damaged_count)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await?;

        self.rentals
            .set_status(&mut tx, rental_id, RentalStatus::Returned)
            .await?;

        if charges > Decimal::ZERO {
            // The charge is added to what is owed, then recorded as paid:
            // total_amount and total_paid both grow by the surcharge.
            let mut charged = rental.clone();
            charged.total_amount += charges;
            self.payments
                .insert_in_tx(
                    &mut tx,
                    &charged,
                    charges,
                    return_date,
                    Some(&format!("Damage charges from return #{}", ret.id)),
                    PaymentSource::DamageCharge,
                )
                .await?;
        }

        self.equipment
            .dispose_on_return(
                &mut tx,
                rental.equipment_id,
                rental.quantity,
                data.condition,
                data.damaged_count,
            )
            .await?;

        tx.commit().await?;
        Ok(ret)
    }

    /// Update a return; a changed surcharge is mirrored onto the
    /// synthesized damage-charge payment and the rental's totals.
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateReturn,
    ) -> AppResult<(RentalReturn, RentalReturn, u64)> {
        let mut tx = super::begin_tx(&self.pool).await?;
        let before = self.lock_by_id(&mut tx, id).await?;
        let rental = self.rentals.lock_by_id(&mut tx, before.rental_id).await?;

        let new_charges = data.additional_charges.unwrap_or(before.additional_charges);
        if new_charges < Decimal::ZERO {
            return Err(AppError::InvalidQuantity(format!(
                "additional charges cannot be negative, got {}",
                new_charges
            )));
        }

        let delta = new_charges - before.additional_charges;
        if delta != Decimal::ZERO {
            let new_total_amount = (rental.total_amount + delta).max(Decimal::ZERO);
            let new_total_paid = (rental.total_paid + delta).max(Decimal::ZERO);
            let payment_type = PaymentType::derive(new_total_paid, new_total_amount);

            match self.payments.find_damage_charge(&mut tx, rental.id).await? {
                Some(payment) if new_charges == Decimal::ZERO => {
                    sqlx::query("DELETE FROM payments WHERE id = $1")
                        .bind(payment.id)
                        .execute(&mut *tx)
                        .await?;
                }
                Some(payment) => {
                    sqlx::query(
                        "UPDATE payments SET amount = $2, payment_type = $3 WHERE id = $1",
                    )
                    .bind(payment.id)
                    .bind(new_charges)
                    .bind(payment_type)
                    .execute(&mut *tx)
                    .await?;
                }
                None if new_charges > Decimal::ZERO => {
                    sqlx::query(
                        r#"
                        INSERT INTO payments
                            (rental_id, amount, payment_type, source, payment_date, notes)
                        VALUES ($1, $2, $3, 'damage_charge', $4, $5)
                        "#,
                    )
                    .bind(rental.id)
                    .bind(new_charges)
                    .bind(payment_type)
                    .bind(Utc::now())
                    .bind(format!("Damage charges from return #{}", id))
                    .execute(&mut *tx)
                    .await?;
                }
                None => {}
            }

            self.rentals
                .set_payment_totals(&mut tx, rental.id, new_total_amount, new_total_paid)
                .await?;
        }

        let after = sqlx::query_as::<_, RentalReturn>(
            r#"
            UPDATE returns SET
                return_date = COALESCE($2, return_date),
                damage_description = COALESCE($3, damage_description),
                additional_charges = $4,
                notes = COALESCE($5, notes)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.return_date)
        .bind(&data.damage_description)
        .bind(new_charges)
        .bind(&data.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((before, after, 1))
    }

    /// Delete a return, reopening the rental.
    ///
    /// Rolls any damage surcharge back out of the rental's totals and drops
    /// the synthesized payment. The equipment status goes back to `rented`
    /// as-is; the counters are not re-derived here.
    pub async fn delete(&self, id: i32) -> AppResult<(RentalReturn, u64)> {
        let mut tx = super::begin_tx(&self.pool).await?;
        let ret = self.lock_by_id(&mut tx, id).await?;
        let rental = self.rentals.lock_by_id(&mut tx, ret.rental_id).await?;

        if ret.additional_charges > Decimal::ZERO {
            if let Some(payment) = self.payments.find_damage_charge(&mut tx, rental.id).await? {
                sqlx::query("DELETE FROM payments WHERE id = $1")
                    .bind(payment.id)
                    .execute(&mut *tx)
                    .await?;
            }
            let new_total_amount =
                (rental.total_amount - ret.additional_charges).max(Decimal::ZERO);
            let new_total_paid = (rental.total_paid - ret.additional_charges).max(Decimal::ZERO);
            self.rentals
                .set_payment_totals(&mut tx, rental.id, new_total_amount, new_total_paid)
                .await?;
        }

        let result = sqlx::query("DELETE FROM returns WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        self.rentals
            .set_status(&mut tx, rental.id, RentalStatus::Active)
            .await?;
        self.equipment
            .set_status(&mut tx, rental.equipment_id, EquipmentStatus::Rented)
            .await?;

        tx.commit().await?;
        Ok((ret, result.rows_affected()))
    }
}
