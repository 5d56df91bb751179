//! Clients repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::client::{Client, CreateClient, UpdateClient},
};

#[derive(Clone)]
pub struct ClientsRepository {
    pool: Pool<Postgres>,
}

impl ClientsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all clients
    pub async fn list(&self) -> AppResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get client by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Client> {
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    /// Create a new client
    pub async fn create(&self, data: &CreateClient) -> AppResult<Client> {
        let row = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, phone, email, address, id_document, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.id_document)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a client
    pub async fn update(&self, id: i32, data: &UpdateClient) -> AppResult<Client> {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                address = COALESCE($5, address),
                id_document = COALESCE($6, id_document),
                notes = COALESCE($7, notes),
                modif_date = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.phone)
        .bind(&data.email)
        .bind(&data.address)
        .bind(&data.id_document)
        .bind(&data.notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))
    }

    /// Delete a client; refused while rentals still reference them
    pub async fn delete(&self, id: i32) -> AppResult<u64> {
        let referenced: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM rentals WHERE client_id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if referenced {
            return Err(AppError::Conflict(format!(
                "Client {} still has rentals on record",
                id
            )));
        }

        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Client {} not found", id)));
        }
        Ok(result.rows_affected())
    }
}
