use std::sync::Arc;
use tracing::{debug, instrument};

use crate::application::dtos::role_dto::{CreateRoleDto, UpdateRoleDto};
use crate::common::errors::{DomainError, Result};
use crate::domain::entities::role::{normalize_permissions, NewRole, Role};
use crate::domain::repositories::role_repository::RoleRepository;

pub struct RoleService {
    role_repository: Arc<dyn RoleRepository>,
}

impl RoleService {
    pub fn new(role_repository: Arc<dyn RoleRepository>) -> Self {
        Self { role_repository }
    }

    #[instrument(skip(self, dto))]
    pub async fn create_role(&self, dto: CreateRoleDto) -> Result<Role> {
        let new_role = NewRole::new(dto.name, dto.description, dto.permissions)?;
        let role = self.role_repository.create_role(new_role).await?;

        debug!("Rol creado: {} ({})", role.name, role.id);
        Ok(role)
    }

    pub async fn get_role(&self, id: i64) -> Result<Role> {
        self.role_repository.get_role(id).await?
            .ok_or_else(|| DomainError::not_found("Role", id.to_string()))
    }

    #[instrument(skip(self, dto))]
    pub async fn update_role(&self, id: i64, dto: UpdateRoleDto) -> Result<Role> {
        let mut role = self.get_role(id).await?;

        if let Some(name) = dto.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::validation_error("Role", "Role name is required"));
            }
            role.name = name;
        }
        if let Some(description) = dto.description {
            role.description = Some(description);
        }
        if let Some(permissions) = dto.permissions {
            role.permissions = normalize_permissions(permissions);
        }

        self.role_repository.update_role(&role).await
    }

    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        self.role_repository.list_roles().await
    }
}
