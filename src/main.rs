//! HireStock Server - Equipment Rental Management System
//!
//! A Rust REST API server for equipment rental bookkeeping.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hirestock_server::{api, config::AppConfig, repository::Repository, services::Services, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("hirestock_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting HireStock Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.auth.clone());

    // Seed the admin account when the users table is empty
    services
        .auth
        .ensure_bootstrap_admin()
        .await
        .expect("Failed to seed admin account");

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Periodic sweep flipping active rentals past their end date to overdue
    {
        let services = state.services.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
            loop {
                interval.tick().await;
                match services.rentals.mark_overdue_sweep().await {
                    Ok(0) => {}
                    Ok(n) => tracing::info!("Marked {} rentals as overdue", n),
                    Err(e) => tracing::warn!("Overdue sweep failed: {}", e),
                }
            }
        });
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Authentication
        .route("/auth/login", post(api::auth::login))
        .route("/auth/me", get(api::auth::me))
        // Equipment
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        .route(
            "/equipment/:id/maintenance",
            post(api::equipment::adjust_maintenance),
        )
        // Clients
        .route("/clients", get(api::clients::list_clients))
        .route("/clients", post(api::clients::create_client))
        .route("/clients/:id", get(api::clients::get_client))
        .route("/clients/:id", put(api::clients::update_client))
        .route("/clients/:id", delete(api::clients::delete_client))
        .route("/clients/:id/rentals", get(api::rentals::get_client_rentals))
        // Rentals
        .route("/rentals", get(api::rentals::list_rentals))
        .route("/rentals", post(api::rentals::create_rental))
        .route("/rentals/:id", get(api::rentals::get_rental))
        .route("/rentals/:id", put(api::rentals::update_rental))
        .route("/rentals/:id", delete(api::rentals::delete_rental))
        // Payments
        .route("/rentals/:id/payments", get(api::payments::list_rental_payments))
        .route("/rentals/:id/payments", post(api::payments::add_payment))
        .route("/payments/:id", put(api::payments::update_payment))
        .route("/payments/:id", delete(api::payments::delete_payment))
        // Returns
        .route("/returns", get(api::returns::list_returns))
        .route("/returns/:id", get(api::returns::get_return))
        .route("/rentals/:id/returns", post(api::returns::add_return))
        .route("/returns/:id", put(api::returns::update_return))
        .route("/returns/:id", delete(api::returns::delete_return))
        // Users
        .route("/users", get(api::users::list_users))
        .route("/users", post(api::users::create_user))
        .route("/users/:id", get(api::users::get_user))
        .route("/users/:id", put(api::users::update_user))
        // Activity log
        .route("/activity", get(api::activity::list_activity))
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
