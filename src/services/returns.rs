//! Return processing service

use crate::{
    error::AppResult,
    models::rental_return::{CreateReturn, RentalReturn, UpdateReturn},
    repository::Repository,
};

use super::activity::ActivityService;

#[derive(Clone)]
pub struct ReturnsService {
    repository: Repository,
    activity: ActivityService,
}

impl ReturnsService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    /// List all returns
    pub async fn list(&self) -> AppResult<Vec<RentalReturn>> {
        self.repository.returns.list().await
    }

    /// Get a return by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<RentalReturn> {
        self.repository.returns.get_by_id(id).await
    }

    /// Record an equipment return
    pub async fn add(
        &self,
        rental_id: i32,
        data: &CreateReturn,
        actor_id: i32,
    ) -> AppResult<RentalReturn> {
        let ret = self.repository.returns.add(rental_id, data).await?;
        self.activity.log(
            actor_id,
            "Create",
            "returns",
            Some(ret.id),
            None,
            ActivityService::snapshot(&ret),
        );
        Ok(ret)
    }

    /// Update a return, mirroring surcharge changes onto the payment ledger
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateReturn,
        actor_id: i32,
    ) -> AppResult<(RentalReturn, u64)> {
        let (before, after, affected) = self.repository.returns.update(id, data).await?;
        self.activity.log(
            actor_id,
            "Update",
            "returns",
            Some(id),
            ActivityService::snapshot(&before),
            ActivityService::snapshot(&after),
        );
        Ok((after, affected))
    }

    /// Delete a return, reopening the rental
    pub async fn delete(&self, id: i32, actor_id: i32) -> AppResult<u64> {
        let (ret, affected) = self.repository.returns.delete(id).await?;
        self.activity.log(
            actor_id,
            "Delete",
            "returns",
            Some(id),
            ActivityService::snapshot(&ret),
            None,
        );
        Ok(affected)
    }
}
