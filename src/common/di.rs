use std::sync::Arc;
use sqlx::PgPool;

use crate::application::ports::auth_ports::AuthProviderPort;
use crate::application::ports::trash_ports::TrashUseCase;
use crate::application::services::{
    CalendarEventService, DepartmentService, EntityRepositories, LeaveRequestService, RoleService,
    TrashService, UserService,
};
use crate::common::config::AppConfig;
use crate::common::errors::DomainError;
use crate::domain::repositories::leave_credit_repository::LeaveCreditRepository;
use crate::domain::repositories::trash_repository::TrashRepository;
use crate::domain::services::auth_service::AuthService;
use crate::infrastructure::repositories::pg::{
    CalendarEventPgRepository, DepartmentPgRepository, LeaveCreditPgRepository, LeaveRequestPgRepository,
    RolePgRepository, TrashPgRepository, UserPgRepository,
};
use crate::infrastructure::services::auth_provider_client::{AuthProviderClient, NoopAuthProvider};

/// Conjunto de repositorios sobre el que se construyen los servicios
#[derive(Clone)]
pub struct RepositoryServices {
    pub entities: EntityRepositories,
    pub credits: Arc<dyn LeaveCreditRepository>,
    pub trash: Arc<dyn TrashRepository>,
}

impl RepositoryServices {
    /// Repositorios PostgreSQL compartiendo un mismo pool
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            entities: EntityRepositories {
                users: Arc::new(UserPgRepository::new(pool.clone())),
                departments: Arc::new(DepartmentPgRepository::new(pool.clone())),
                roles: Arc::new(RolePgRepository::new(pool.clone())),
                requests: Arc::new(LeaveRequestPgRepository::new(pool.clone())),
                events: Arc::new(CalendarEventPgRepository::new(pool.clone())),
            },
            credits: Arc::new(LeaveCreditPgRepository::new(pool.clone())),
            trash: Arc::new(TrashPgRepository::new(pool)),
        }
    }
}

/// Elige el cliente del proveedor de autenticación según la configuración
pub fn create_auth_provider(config: &AppConfig) -> Result<Arc<dyn AuthProviderPort>, DomainError> {
    match config.auth_provider.url.as_deref() {
        Some(url) => {
            tracing::info!("Proveedor de autenticación configurado en {}", url);
            Ok(Arc::new(AuthProviderClient::new(&config.auth_provider, url)?))
        },
        None => {
            tracing::warn!("Sin proveedor de autenticación: las cuentas de acceso no se suspenderán");
            Ok(Arc::new(NoopAuthProvider))
        }
    }
}

/// Estado global de la aplicación para dependency injection
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub auth_service: Arc<AuthService>,
    pub trash_service: Arc<dyn TrashUseCase>,
    pub user_service: Arc<UserService>,
    pub department_service: Arc<DepartmentService>,
    pub role_service: Arc<RoleService>,
    pub leave_request_service: Arc<LeaveRequestService>,
    pub calendar_event_service: Arc<CalendarEventService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        repositories: &RepositoryServices,
        auth_provider: Arc<dyn AuthProviderPort>,
    ) -> Self {
        let entities = &repositories.entities;

        let trash_service = Arc::new(TrashService::new(
            repositories.trash.clone(),
            entities.clone(),
            auth_provider,
        ));

        Self {
            auth_service: Arc::new(AuthService::new(config.auth.jwt_secret.clone())),
            trash_service,
            user_service: Arc::new(UserService::new(
                entities.users.clone(),
                entities.departments.clone(),
                entities.roles.clone(),
            )),
            department_service: Arc::new(DepartmentService::new(entities.departments.clone())),
            role_service: Arc::new(RoleService::new(entities.roles.clone())),
            leave_request_service: Arc::new(LeaveRequestService::new(
                entities.requests.clone(),
                repositories.credits.clone(),
                entities.users.clone(),
            )),
            calendar_event_service: Arc::new(CalendarEventService::new(entities.events.clone())),
            config,
        }
    }
}
