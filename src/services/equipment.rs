//! Equipment service

use serde_json::json;

use crate::{
    error::AppResult,
    models::equipment::{
        CreateEquipment, Equipment, MaintenanceAdjustment, MaintenanceResult, UpdateEquipment,
    },
    repository::Repository,
};

use super::activity::ActivityService;

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    activity: ActivityService,
}

impl EquipmentService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment, actor_id: i32) -> AppResult<Equipment> {
        let equipment = self.repository.equipment.create(data).await?;
        self.activity.log(
            actor_id,
            "Create",
            "equipment",
            Some(equipment.id),
            None,
            ActivityService::snapshot(&equipment),
        );
        Ok(equipment)
    }

    pub async fn update(
        &self,
        id: i32,
        data: &UpdateEquipment,
        actor_id: i32,
    ) -> AppResult<Equipment> {
        let before = self.repository.equipment.get_by_id(id).await?;
        let after = self.repository.equipment.update(id, data).await?;
        self.activity.log(
            actor_id,
            "Update",
            "equipment",
            Some(id),
            ActivityService::snapshot(&before),
            ActivityService::snapshot(&after),
        );
        Ok(after)
    }

    pub async fn delete(&self, id: i32, actor_id: i32) -> AppResult<u64> {
        let before = self.repository.equipment.get_by_id(id).await?;
        let affected = self.repository.equipment.delete(id).await?;
        self.activity.log(
            actor_id,
            "Delete",
            "equipment",
            Some(id),
            ActivityService::snapshot(&before),
            None,
        );
        Ok(affected)
    }

    /// Move units between the shelf and the maintenance pool
    pub async fn adjust_maintenance(
        &self,
        id: i32,
        adjustment: &MaintenanceAdjustment,
        actor_id: i32,
    ) -> AppResult<MaintenanceResult> {
        let before = self.repository.equipment.get_by_id(id).await?;
        let result = self
            .repository
            .equipment
            .adjust_maintenance(id, adjustment)
            .await?;
        self.activity.log(
            actor_id,
            "Maintenance",
            "equipment",
            Some(id),
            Some(json!({
                "quantity_available": before.quantity_available,
                "maintenance_quantity": before.maintenance_quantity,
            })),
            Some(json!({
                "quantity_available": result.new_available,
                "maintenance_quantity": result.new_maintenance,
            })),
        );
        Ok(result)
    }
}
