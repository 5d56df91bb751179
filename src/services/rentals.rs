//! Rental lifecycle service

use crate::{
    error::AppResult,
    models::{
        enums::RentalStatus,
        rental::{CreateRental, Rental, RentalDetails, UpdateRental},
    },
    repository::Repository,
};

use super::activity::ActivityService;

#[derive(Clone)]
pub struct RentalsService {
    repository: Repository,
    activity: ActivityService,
}

impl RentalsService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    /// List all rentals
    pub async fn list(&self) -> AppResult<Vec<RentalDetails>> {
        self.repository.rentals.list().await
    }

    /// Get a rental by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Rental> {
        self.repository.rentals.get_by_id(id).await
    }

    /// Rentals for one client
    pub async fn list_for_client(&self, client_id: i32) -> AppResult<Vec<RentalDetails>> {
        // Verify client exists
        self.repository.clients.get_by_id(client_id).await?;
        self.repository.rentals.list_for_client(client_id).await
    }

    /// Create a rental, reserving equipment units
    pub async fn create(&self, data: &CreateRental, actor_id: i32) -> AppResult<Rental> {
        let rental = self.repository.rentals.create(data).await?;
        self.activity.log(
            actor_id,
            "Create",
            "rentals",
            Some(rental.id),
            None,
            ActivityService::snapshot(&rental),
        );
        Ok(rental)
    }

    /// Update rental fields
    pub async fn update(&self, id: i32, data: &UpdateRental, actor_id: i32) -> AppResult<Rental> {
        let (before, after) = self.repository.rentals.update(id, data).await?;

        // A transition into released gets its own audit verb
        let action = if before.status != RentalStatus::Released
            && after.status == RentalStatus::Released
        {
            "Release"
        } else {
            "Update"
        };
        self.activity.log(
            actor_id,
            action,
            "rentals",
            Some(id),
            ActivityService::snapshot(&before),
            ActivityService::snapshot(&after),
        );
        Ok(after)
    }

    /// Delete a rental and release its reserved units
    pub async fn delete(&self, id: i32, actor_id: i32) -> AppResult<u64> {
        let (rental, affected) = self.repository.rentals.delete(id).await?;
        self.activity.log(
            actor_id,
            "Delete",
            "rentals",
            Some(id),
            ActivityService::snapshot(&rental),
            None,
        );
        Ok(affected)
    }

    /// Flip active rentals past their end date to overdue
    pub async fn mark_overdue_sweep(&self) -> AppResult<u64> {
        self.repository.rentals.mark_overdue_sweep().await
    }
}
