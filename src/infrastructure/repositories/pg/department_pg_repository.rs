use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::department::{Department, NewDepartment};
use crate::domain::repositories::department_repository::DepartmentRepository;
use super::map_sqlx_error;

pub struct DepartmentPgRepository {
    pool: Arc<PgPool>,
}

impl DepartmentPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn row_to_department(row: &PgRow) -> Department {
        Department {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentPgRepository {
    async fn create_department(&self, department: NewDepartment) -> Result<Department> {
        let row = sqlx::query(
            r#"
            INSERT INTO departments (name, description, created_at)
            VALUES ($1, $2, NOW())
            RETURNING id, name, description, created_at
            "#
        )
        .bind(&department.name)
        .bind(&department.description)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Department", e))?;

        Ok(Self::row_to_department(&row))
    }

    async fn get_department(&self, id: i64) -> Result<Option<Department>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM departments
            WHERE id = $1 AND removed_at IS NULL
            "#
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Department", e))?;

        Ok(row.as_ref().map(Self::row_to_department))
    }

    async fn update_department(&self, department: &Department) -> Result<Department> {
        let row = sqlx::query(
            r#"
            UPDATE departments SET name = $2, description = $3
            WHERE id = $1 AND removed_at IS NULL
            RETURNING id, name, description, created_at
            "#
        )
        .bind(department.id)
        .bind(&department.name)
        .bind(&department.description)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Department", e))?;

        row.as_ref()
            .map(Self::row_to_department)
            .ok_or_else(|| DomainError::not_found("Department", department.id.to_string()))
    }

    async fn list_departments(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, created_at
            FROM departments
            WHERE removed_at IS NULL
            ORDER BY name, id
            "#
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Department", e))?;

        Ok(rows.iter().map(Self::row_to_department).collect())
    }
}
