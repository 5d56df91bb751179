//! Business logic services

pub mod activity;
pub mod auth;
pub mod clients;
pub mod equipment;
pub mod payments;
pub mod rentals;
pub mod returns;
pub mod stats;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
    pub rentals: rentals::RentalsService,
    pub payments: payments::PaymentsService,
    pub returns: returns::ReturnsService,
    pub clients: clients::ClientsService,
    pub activity: activity::ActivityService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        let activity = activity::ActivityService::new(repository.clone());
        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone(), activity.clone()),
            rentals: rentals::RentalsService::new(repository.clone(), activity.clone()),
            payments: payments::PaymentsService::new(repository.clone(), activity.clone()),
            returns: returns::ReturnsService::new(repository.clone(), activity.clone()),
            clients: clients::ClientsService::new(repository.clone(), activity.clone()),
            stats: stats::StatsService::new(repository.clone()),
            activity,
            repository,
        }
    }

    /// Database connectivity check backing the readiness endpoint
    pub async fn ping_database(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await?;
        Ok(())
    }
}
