//! Client model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Client record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// National ID / driving licence number kept for the rental contract
    pub id_document: Option<String>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create client request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub id_document: Option<String>,
    pub notes: Option<String>,
}

/// Update client request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClient {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub address: Option<String>,
    pub id_document: Option<String>,
    pub notes: Option<String>,
}
