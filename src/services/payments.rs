//! Payment ledger service

use serde_json::json;

use crate::{
    error::AppResult,
    models::payment::{CreatePayment, Payment, PaymentResult, UpdatePayment},
    repository::Repository,
};

use super::activity::ActivityService;

#[derive(Clone)]
pub struct PaymentsService {
    repository: Repository,
    activity: ActivityService,
}

impl PaymentsService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    /// Payments recorded against a rental
    pub async fn list_for_rental(&self, rental_id: i32) -> AppResult<Vec<Payment>> {
        // Verify rental exists
        self.repository.rentals.get_by_id(rental_id).await?;
        self.repository.payments.list_for_rental(rental_id).await
    }

    /// Record a payment
    pub async fn add(
        &self,
        rental_id: i32,
        data: &CreatePayment,
        actor_id: i32,
    ) -> AppResult<PaymentResult> {
        let result = self.repository.payments.add(rental_id, data).await?;
        self.activity.log(
            actor_id,
            "Create",
            "payments",
            Some(result.id),
            None,
            Some(json!({
                "rental_id": rental_id,
                "amount": data.amount,
                "payment_type": result.payment_type,
            })),
        );
        Ok(result)
    }

    /// Update payment fields; the owning rental's totals are untouched
    pub async fn update(
        &self,
        id: i32,
        data: &UpdatePayment,
        actor_id: i32,
    ) -> AppResult<Payment> {
        let (before, after) = self.repository.payments.update(id, data).await?;
        self.activity.log(
            actor_id,
            "Update",
            "payments",
            Some(id),
            ActivityService::snapshot(&before),
            ActivityService::snapshot(&after),
        );
        Ok(after)
    }

    /// Delete a payment, rolling the rental's totals back
    pub async fn delete(&self, id: i32, actor_id: i32) -> AppResult<u64> {
        let (payment, affected) = self.repository.payments.delete(id).await?;
        if let Some(payment) = payment {
            self.activity.log(
                actor_id,
                "Delete",
                "payments",
                Some(id),
                ActivityService::snapshot(&payment),
                None,
            );
        }
        Ok(affected)
    }
}
