use std::sync::Arc;
use async_trait::async_trait;
use uuid::Uuid;
use tracing::{debug, error, info, instrument, warn};

use crate::application::dtos::trash_dto::{DeletionOutcomeDto, EmptyTrashDto, TrashActionDto, TrashedItemDto};
use crate::application::ports::auth_ports::AuthProviderPort;
use crate::application::ports::trash_ports::TrashUseCase;
use crate::common::errors::{Result, DomainError, ErrorKind};
use crate::domain::entities::trashed_item::{TrashPayload, TrashedItem, TrashedItemType};
use crate::domain::repositories::calendar_event_repository::CalendarEventRepository;
use crate::domain::repositories::department_repository::DepartmentRepository;
use crate::domain::repositories::leave_request_repository::LeaveRequestRepository;
use crate::domain::repositories::role_repository::RoleRepository;
use crate::domain::repositories::trash_repository::{CascadeStep, CascadeWarning, TrashRepository};
use crate::domain::repositories::user_repository::UserRepository;

/// Repositorios de las tablas de origen que la papelera necesita consultar
#[derive(Clone)]
pub struct EntityRepositories {
    pub users: Arc<dyn UserRepository>,
    pub departments: Arc<dyn DepartmentRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub requests: Arc<dyn LeaveRequestRepository>,
    pub events: Arc<dyn CalendarEventRepository>,
}

/// Servicio de aplicación para operaciones de papelera
pub struct TrashService {
    trash_repository: Arc<dyn TrashRepository>,
    entities: EntityRepositories,
    auth_provider: Arc<dyn AuthProviderPort>,
}

impl TrashService {
    pub fn new(
        trash_repository: Arc<dyn TrashRepository>,
        entities: EntityRepositories,
        auth_provider: Arc<dyn AuthProviderPort>,
    ) -> Self {
        Self {
            trash_repository,
            entities,
            auth_provider,
        }
    }

    fn parse_trash_id(trash_id: &str) -> Result<Uuid> {
        Uuid::parse_str(trash_id.trim())
            .map_err(|e| DomainError::validation_error("Trash", format!("Invalid trash ID '{}': {}", trash_id, e)))
    }

    fn parse_numeric_id(entity_type: &'static str, id: &str) -> Result<i64> {
        id.trim().parse::<i64>()
            .map_err(|_| DomainError::validation_error(entity_type, format!("Invalid {} ID: {}", entity_type, id)))
    }

    fn outcome(item: &TrashedItem, cascade_warnings: Vec<CascadeWarning>) -> DeletionOutcomeDto {
        DeletionOutcomeDto {
            deleted_id: item.original_id(),
            item_type: item.item_type().to_string(),
            trash_id: item.id.to_string(),
            primary_deleted: true,
            cascade_warnings,
        }
    }

    /// Guarda la instantánea y marca la fila de origen en una sola transacción
    async fn trash(&self, item: &TrashedItem, cascade: &[CascadeStep]) -> Result<Vec<CascadeWarning>> {
        let warnings = self.trash_repository.add_to_trash(item, cascade).await?;
        for warning in &warnings {
            warn!(
                "Limpieza en cascada fallida al eliminar {} {}: {} ({})",
                item.item_type(), item.original_id(), warning.step, warning.message
            );
        }
        Ok(warnings)
    }

    /// Elimina un usuario: sus solicitudes y créditos se borran, su cuenta de acceso se suspende
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: &str, actor_id: &str) -> Result<DeletionOutcomeDto> {
        info!("Eliminando usuario {} (solicitado por {})", user_id, actor_id);

        let user = self.entities.users.get_user_by_id(user_id).await?
            .ok_or_else(|| DomainError::not_found("User", user_id.to_string()))?;

        // deleted_by queda nulo: el autor podría ser eliminado más tarde
        let item = TrashedItem::new(TrashPayload::User(user), None);
        let mut warnings = self.trash(&item, &CascadeStep::USER).await?;

        if let Err(e) = self.auth_provider.suspend_account(user_id).await {
            warn!("No se pudo suspender la cuenta de acceso de {}: {}", user_id, e);
            warnings.push(CascadeWarning::new("auth_provider.suspend", e.to_string()));
        }

        debug!("Usuario movido a papelera: {}", user_id);
        Ok(Self::outcome(&item, warnings))
    }

    /// Elimina un departamento; se rechaza mientras algún usuario pertenezca a él
    #[instrument(skip(self))]
    pub async fn delete_department(&self, department_id: &str, actor_id: &str) -> Result<DeletionOutcomeDto> {
        let id = Self::parse_numeric_id("Department", department_id)?;

        let department = self.entities.departments.get_department(id).await?
            .ok_or_else(|| DomainError::not_found("Department", department_id.to_string()))?;

        let assigned = self.entities.users.count_users_in_department(id).await?;
        if assigned > 0 {
            return Err(DomainError::conflict(
                "Department",
                format!("Department {} still has {} user(s); reassign them before deleting it", id, assigned),
            ).with_id(department_id));
        }

        let item = TrashedItem::new(TrashPayload::Department(department), Some(actor_id.to_string()));
        let warnings = self.trash(&item, &[]).await?;

        debug!("Departamento movido a papelera: {}", id);
        Ok(Self::outcome(&item, warnings))
    }

    /// Elimina un rol; se rechaza informando cuántos usuarios lo tienen asignado
    #[instrument(skip(self))]
    pub async fn delete_role(&self, role_id: &str, actor_id: &str) -> Result<DeletionOutcomeDto> {
        let id = Self::parse_numeric_id("Role", role_id)?;

        let role = self.entities.roles.get_role(id).await?
            .ok_or_else(|| DomainError::not_found("Role", role_id.to_string()))?;

        let assigned = self.entities.users.count_users_with_role(id).await?;
        if assigned > 0 {
            return Err(DomainError::conflict(
                "Role",
                format!("Role {} is still assigned to {} user(s)", id, assigned),
            ).with_id(role_id));
        }

        let item = TrashedItem::new(TrashPayload::Role(role), Some(actor_id.to_string()));
        let warnings = self.trash(&item, &[]).await?;

        debug!("Rol movido a papelera: {}", id);
        Ok(Self::outcome(&item, warnings))
    }

    #[instrument(skip(self))]
    pub async fn delete_request(&self, request_id: &str, actor_id: &str) -> Result<DeletionOutcomeDto> {
        let id = Self::parse_numeric_id("Request", request_id)?;

        let request = self.entities.requests.get_request(id).await?
            .ok_or_else(|| DomainError::not_found("Request", request_id.to_string()))?;

        let item = TrashedItem::new(TrashPayload::Request(request), Some(actor_id.to_string()));
        let warnings = self.trash(&item, &[]).await?;

        debug!("Solicitud movida a papelera: {}", id);
        Ok(Self::outcome(&item, warnings))
    }

    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: &str, actor_id: &str) -> Result<DeletionOutcomeDto> {
        let id = Self::parse_numeric_id("Event", event_id)?;

        let event = self.entities.events.get_event(id).await?
            .ok_or_else(|| DomainError::not_found("Event", event_id.to_string()))?;

        let item = TrashedItem::new(TrashPayload::Event(event), Some(actor_id.to_string()));
        let warnings = self.trash(&item, &[]).await?;

        debug!("Evento movido a papelera: {}", id);
        Ok(Self::outcome(&item, warnings))
    }
}

#[async_trait]
impl TrashUseCase for TrashService {
    #[instrument(skip(self))]
    async fn get_trash_items(&self) -> Result<Vec<TrashedItemDto>> {
        let records = self.trash_repository.get_trash_items().await?;
        debug!("Encontrados {} elementos en la papelera", records.len());

        Ok(records.into_iter().map(TrashedItemDto::from).collect())
    }

    #[instrument(skip(self))]
    async fn move_to_trash(&self, item_type: &str, item_id: &str, actor_id: &str) -> Result<DeletionOutcomeDto> {
        match item_type.parse::<TrashedItemType>()? {
            TrashedItemType::User => self.delete_user(item_id, actor_id).await,
            TrashedItemType::Department => self.delete_department(item_id, actor_id).await,
            TrashedItemType::Role => self.delete_role(item_id, actor_id).await,
            TrashedItemType::Request => self.delete_request(item_id, actor_id).await,
            TrashedItemType::Event => self.delete_event(item_id, actor_id).await,
        }
    }

    #[instrument(skip(self))]
    async fn restore_item(&self, trash_id: &str) -> Result<TrashActionDto> {
        info!("Restaurando elemento {} de la papelera", trash_id);

        let trash_uuid = Self::parse_trash_id(trash_id)?;

        let record = self.trash_repository.get_trash_item(&trash_uuid).await?
            .ok_or_else(|| DomainError::not_found("TrashedItem", trash_id.to_string()))?;

        // Una etiqueta desconocida falla aquí y el registro se conserva
        let item = TrashedItem::try_from(record)?;
        let item_type = item.item_type();
        let original_id = item.original_id();

        let mut warnings = self.trash_repository.restore_from_trash(&item).await
            .map_err(|e| DomainError::new(
                ErrorKind::InternalError,
                "Trash",
                format!("Error restoring {} {} from trash: {}", item_type, original_id, e.message)
            ).with_id(trash_id).with_source(e))?;

        for warning in &warnings {
            warn!("{} {} restaurado con avisos: {} ({})", item_type, original_id, warning.step, warning.message);
        }

        if let TrashPayload::User(user) = &item.payload {
            if let Err(e) = self.auth_provider.reinstate_account(&user.id).await {
                warn!("No se pudo reactivar la cuenta de acceso de {}: {}", user.id, e);
                warnings.push(CascadeWarning::new("auth_provider.reinstate", e.to_string()));
            }
        }

        debug!("{} {} restaurado desde papelera", item_type, original_id);
        Ok(TrashActionDto::ok(warnings))
    }

    #[instrument(skip(self))]
    async fn delete_permanently(&self, trash_id: &str) -> Result<TrashActionDto> {
        info!("Eliminando permanentemente elemento {}", trash_id);

        let trash_uuid = Self::parse_trash_id(trash_id)?;

        let purged = match self.trash_repository.delete_permanently(&trash_uuid).await? {
            Some(purged) => purged,
            None => {
                debug!("El elemento {} ya no estaba en la papelera", trash_id);
                return Ok(TrashActionDto::ok(Vec::new()));
            }
        };

        let mut warnings = purged.warnings;
        if purged.origin_purged && purged.record.item_type == TrashedItemType::User.as_str() {
            let user_id = &purged.record.original_id;
            if let Err(e) = self.auth_provider.delete_account(user_id).await {
                warn!("No se pudo borrar la cuenta de acceso de {}: {}", user_id, e);
                warnings.push(CascadeWarning::new("auth_provider.delete", e.to_string()));
            }
        }

        Ok(TrashActionDto::ok(warnings))
    }

    #[instrument(skip(self))]
    async fn empty_trash(&self) -> Result<EmptyTrashDto> {
        info!("Vaciando papelera");

        let records = self.trash_repository.get_trash_items().await?;
        let mut purged = 0;
        let mut warnings = Vec::new();

        for record in records {
            let trash_id = record.id.to_string();
            match self.delete_permanently(&trash_id).await {
                Ok(result) => {
                    purged += 1;
                    warnings.extend(result.warnings);
                },
                Err(e) => {
                    error!("Error al eliminar {} permanentemente: {}", trash_id, e);
                    warnings.push(CascadeWarning::new(format!("trash.{}", trash_id), e.to_string()));
                }
            }
        }

        info!("Papelera vaciada: {} elementos eliminados", purged);
        Ok(EmptyTrashDto {
            success: true,
            purged,
            warnings,
        })
    }
}
