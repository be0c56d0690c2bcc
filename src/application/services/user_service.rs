use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::application::dtos::user_dto::{CreateUserDto, ListUsersQuery, UpdateUserDto};
use crate::common::errors::{DomainError, Result};
use crate::domain::entities::user::{validate_email, validate_name, NewUser, User};
use crate::domain::repositories::department_repository::DepartmentRepository;
use crate::domain::repositories::role_repository::RoleRepository;
use crate::domain::repositories::user_repository::UserRepository;

const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 500;

/// Servicio de empleados. Las referencias a departamento y rol deben apuntar a filas activas.
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    department_repository: Arc<dyn DepartmentRepository>,
    role_repository: Arc<dyn RoleRepository>,
}

impl UserService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        department_repository: Arc<dyn DepartmentRepository>,
        role_repository: Arc<dyn RoleRepository>,
    ) -> Self {
        Self {
            user_repository,
            department_repository,
            role_repository,
        }
    }

    async fn check_references(&self, department_id: Option<i64>, role_id: Option<i64>) -> Result<()> {
        if let Some(department_id) = department_id {
            if self.department_repository.get_department(department_id).await?.is_none() {
                return Err(DomainError::validation_error(
                    "User",
                    format!("Department {} does not exist", department_id),
                ));
            }
        }
        if let Some(role_id) = role_id {
            if self.role_repository.get_role(role_id).await?.is_none() {
                return Err(DomainError::validation_error(
                    "User",
                    format!("Role {} does not exist", role_id),
                ));
            }
        }
        Ok(())
    }

    #[instrument(skip(self, dto))]
    pub async fn create_user(&self, dto: CreateUserDto) -> Result<User> {
        let new_user = NewUser::new(
            dto.id,
            dto.email,
            dto.first_name,
            dto.last_name,
            dto.position,
            dto.department_id,
            dto.role_id,
            dto.hired_on,
        )?;
        self.check_references(new_user.department_id, new_user.role_id).await?;

        let user = self.user_repository.create_user(new_user).await?;
        info!("Usuario creado: {} <{}>", user.id, user.email);
        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.user_repository.get_user_by_id(id).await?
            .ok_or_else(|| DomainError::not_found("User", id.to_string()))
    }

    #[instrument(skip(self, dto))]
    pub async fn update_user(&self, id: &str, dto: UpdateUserDto) -> Result<User> {
        let mut user = self.get_user(id).await?;

        if let Some(email) = dto.email {
            validate_email(&email)?;
            user.email = email.trim().to_lowercase();
        }
        if let Some(first_name) = dto.first_name {
            validate_name("first_name", &first_name)?;
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = dto.last_name {
            validate_name("last_name", &last_name)?;
            user.last_name = last_name.trim().to_string();
        }
        if dto.position.is_some() {
            user.position = dto.position;
        }
        if dto.hired_on.is_some() {
            user.hired_on = dto.hired_on;
        }

        self.check_references(dto.department_id, dto.role_id).await?;
        if dto.department_id.is_some() {
            user.department_id = dto.department_id;
        }
        if dto.role_id.is_some() {
            user.role_id = dto.role_id;
        }

        let updated = self.user_repository.update_user(&user).await?;
        debug!("Usuario actualizado: {}", updated.id);
        Ok(updated)
    }

    pub async fn list_users(&self, query: ListUsersQuery) -> Result<Vec<User>> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = query.offset.unwrap_or(0).max(0);

        self.user_repository.list_users(limit, offset).await
    }
}
