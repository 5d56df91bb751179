//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{activity, auth, clients, equipment, health, payments, rentals, returns, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HireStock API",
        version = "1.0.0",
        description = "Equipment Rental Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        equipment::adjust_maintenance,
        // Clients
        clients::list_clients,
        clients::get_client,
        clients::create_client,
        clients::update_client,
        clients::delete_client,
        // Rentals
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        rentals::update_rental,
        rentals::delete_rental,
        rentals::get_client_rentals,
        // Payments
        payments::list_rental_payments,
        payments::add_payment,
        payments::update_payment,
        payments::delete_payment,
        // Returns
        returns::list_returns,
        returns::get_return,
        returns::add_return,
        returns::update_return,
        returns::delete_return,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        // Activity
        activity::list_activity,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::MaintenanceAdjustment,
            crate::models::equipment::MaintenanceResult,
            // Clients
            crate::models::client::Client,
            crate::models::client::CreateClient,
            crate::models::client::UpdateClient,
            // Rentals
            crate::models::rental::Rental,
            crate::models::rental::RentalDetails,
            crate::models::rental::CreateRental,
            crate::models::rental::UpdateRental,
            rentals::RentalCreatedResponse,
            // Payments
            crate::models::payment::Payment,
            crate::models::payment::CreatePayment,
            crate::models::payment::UpdatePayment,
            crate::models::payment::PaymentResult,
            // Returns
            crate::models::rental_return::RentalReturn,
            crate::models::rental_return::CreateReturn,
            crate::models::rental_return::UpdateReturn,
            returns::ReturnCreatedResponse,
            // Users
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Activity
            crate::models::activity::ActivityLog,
            // Enums
            crate::models::enums::EquipmentStatus,
            crate::models::enums::RentalStatus,
            crate::models::enums::PaymentStatus,
            crate::models::enums::PaymentType,
            crate::models::enums::PaymentSource,
            crate::models::enums::ReturnCondition,
            crate::models::enums::MaintenanceAction,
            crate::models::enums::UserRole,
            // Stats
            crate::services::stats::StatsResponse,
            // Shared
            crate::api::AffectedResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "equipment", description = "Equipment inventory management"),
        (name = "clients", description = "Client management"),
        (name = "rentals", description = "Rental lifecycle"),
        (name = "payments", description = "Payment ledger"),
        (name = "returns", description = "Return processing"),
        (name = "users", description = "Staff account management"),
        (name = "activity", description = "Activity log"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
