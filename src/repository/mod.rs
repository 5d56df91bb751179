//! Repository layer for database operations

pub mod activity;
pub mod clients;
pub mod equipment;
pub mod payments;
pub mod rentals;
pub mod returns;
pub mod users;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// How long a transaction waits on a row lock before failing with Contention
const LOCK_TIMEOUT: &str = "5s";

/// Begin a transaction with the lock-wait timeout applied.
///
/// Every ledger operation runs inside one of these: row locks taken with
/// SELECT ... FOR UPDATE are held until commit, and a lock wait longer than
/// LOCK_TIMEOUT surfaces as AppError::Contention instead of blocking.
pub(crate) async fn begin_tx(pool: &Pool<Postgres>) -> AppResult<Transaction<'static, Postgres>> {
    let mut tx = pool.begin().await?;
    sqlx::query(&format!("SET LOCAL lock_timeout = '{}'", LOCK_TIMEOUT))
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub rentals: rentals::RentalsRepository,
    pub payments: payments::PaymentsRepository,
    pub returns: returns::ReturnsRepository,
    pub clients: clients::ClientsRepository,
    pub users: users::UsersRepository,
    pub activity: activity::ActivityRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            rentals: rentals::RentalsRepository::new(pool.clone()),
            payments: payments::PaymentsRepository::new(pool.clone()),
            returns: returns::ReturnsRepository::new(pool.clone()),
            clients: clients::ClientsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            activity: activity::ActivityRepository::new(pool.clone()),
            pool,
        }
    }
}
