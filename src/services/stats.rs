//! Statistics service

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, repository::Repository};

/// Dashboard counters
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub active_rentals: i64,
    pub overdue_rentals: i64,
    pub units_in_maintenance: i64,
    /// Sum of unpaid balances across open rentals
    pub outstanding_balance: Decimal,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Collect the dashboard counters. Plain reads of committed state.
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let active_rentals = self.repository.rentals.count_active().await?;
        let overdue_rentals = self.repository.rentals.count_overdue().await?;
        let units_in_maintenance =
            self.repository.equipment.count_units_in_maintenance().await?;
        let outstanding_balance = self.repository.rentals.outstanding_balance().await?;

        Ok(StatsResponse {
            active_rentals,
            overdue_rentals,
            units_in_maintenance,
            outstanding_balance,
        })
    }
}
