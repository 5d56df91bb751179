//! Client management service

use crate::{
    error::AppResult,
    models::client::{Client, CreateClient, UpdateClient},
    repository::Repository,
};

use super::activity::ActivityService;

#[derive(Clone)]
pub struct ClientsService {
    repository: Repository,
    activity: ActivityService,
}

impl ClientsService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    pub async fn list(&self) -> AppResult<Vec<Client>> {
        self.repository.clients.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        self.repository.clients.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateClient, actor_id: i32) -> AppResult<Client> {
        let client = self.repository.clients.create(data).await?;
        self.activity.log(
            actor_id,
            "Create",
            "clients",
            Some(client.id),
            None,
            ActivityService::snapshot(&client),
        );
        Ok(client)
    }

    pub async fn update(&self, id: i32, data: &UpdateClient, actor_id: i32) -> AppResult<Client> {
        let before = self.repository.clients.get_by_id(id).await?;
        let after = self.repository.clients.update(id, data).await?;
        self.activity.log(
            actor_id,
            "Update",
            "clients",
            Some(id),
            ActivityService::snapshot(&before),
            ActivityService::snapshot(&after),
        );
        Ok(after)
    }

    pub async fn delete(&self, id: i32, actor_id: i32) -> AppResult<u64> {
        let before = self.repository.clients.get_by_id(id).await?;
        let affected = self.repository.clients.delete(id).await?;
        self.activity.log(
            actor_id,
            "Delete",
            "clients",
            Some(id),
            ActivityService::snapshot(&before),
            None,
        );
        Ok(affected)
    }
}
