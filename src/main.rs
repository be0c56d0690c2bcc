//! hrdesk - HR dashboard backend
//!
//! Employees, departments, roles, leave requests and calendar events, with a shared
//! trash: deleting any of them keeps a full snapshot that can be restored or purged.
//!
//! The architecture follows the Clean/Hexagonal Architecture pattern with:
//!
//! - Domain Layer: Core business entities and repository interfaces (domain/*)
//! - Application Layer: Use cases and service orchestration (application/*)
//! - Infrastructure Layer: PostgreSQL repositories and the auth provider client (infrastructure/*)
//! - Interface Layer: API endpoints and middleware (interfaces/*)

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hrdesk::common::config::AppConfig;
use hrdesk::common::db::{create_database_pool, ensure_schema};
use hrdesk::common::di::{create_auth_provider, AppState, RepositoryServices};
use hrdesk::infrastructure::services::trash_cleanup_service::TrashCleanupService;
use hrdesk::interfaces::create_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = AppConfig::from_env();

    let pool = Arc::new(create_database_pool(&config).await?);
    ensure_schema(&pool).await?;
    tracing::info!("PostgreSQL database pool initialized successfully");

    let repositories = RepositoryServices::postgres(pool);
    let auth_provider = create_auth_provider(&config)?;
    let app_state = AppState::new(config.clone(), &repositories, auth_provider);

    // Initialize trash cleanup service
    let cleanup_service = TrashCleanupService::new(
        app_state.trash_service.clone(),
        repositories.trash.clone(),
        &config.trash,
    );
    if cleanup_service.is_enabled() {
        cleanup_service.start_cleanup_job().await;
        tracing::info!("Trash cleanup service started, retention {} days", config.trash.retention_days);
    }

    let app = create_app(app_state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting hrdesk server on http://{}", addr);

    axum::serve(listener, app).await?;

    tracing::info!("Server shutdown completed");
    Ok(())
}
