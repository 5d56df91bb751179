//! Data models for HireStock

pub mod activity;
pub mod client;
pub mod enums;
pub mod equipment;
pub mod payment;
pub mod rental;
pub mod rental_return;
pub mod user;

// Re-export commonly used types
pub use activity::{ActivityLog, NewActivity};
pub use client::Client;
pub use enums::{
    EquipmentStatus, MaintenanceAction, PaymentSource, PaymentStatus, PaymentType,
    RentalStatus, ReturnCondition, UserRole,
};
pub use equipment::Equipment;
pub use payment::Payment;
pub use rental::{Rental, RentalDetails};
pub use rental_return::RentalReturn;
pub use user::User;
