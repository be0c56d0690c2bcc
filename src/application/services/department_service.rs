use std::sync::Arc;
use tracing::{debug, instrument};

use crate::application::dtos::department_dto::{CreateDepartmentDto, UpdateDepartmentDto};
use crate::common::errors::{DomainError, Result};
use crate::domain::entities::department::{Department, NewDepartment};
use crate::domain::repositories::department_repository::DepartmentRepository;

/// Alta, consulta y edición de departamentos (la baja pasa por la papelera)
pub struct DepartmentService {
    department_repository: Arc<dyn DepartmentRepository>,
}

impl DepartmentService {
    pub fn new(department_repository: Arc<dyn DepartmentRepository>) -> Self {
        Self { department_repository }
    }

    #[instrument(skip(self, dto))]
    pub async fn create_department(&self, dto: CreateDepartmentDto) -> Result<Department> {
        let new_department = NewDepartment::new(dto.name, dto.description)?;
        let department = self.department_repository.create_department(new_department).await?;

        debug!("Departamento creado: {} ({})", department.name, department.id);
        Ok(department)
    }

    pub async fn get_department(&self, id: i64) -> Result<Department> {
        self.department_repository.get_department(id).await?
            .ok_or_else(|| DomainError::not_found("Department", id.to_string()))
    }

    #[instrument(skip(self, dto))]
    pub async fn update_department(&self, id: i64, dto: UpdateDepartmentDto) -> Result<Department> {
        let mut department = self.get_department(id).await?;

        if let Some(name) = dto.name {
            department.rename(name)?;
        }
        if let Some(description) = dto.description {
            department.description = Some(description).filter(|d| !d.trim().is_empty());
        }

        self.department_repository.update_department(&department).await
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>> {
        self.department_repository.list_departments().await
    }
}
