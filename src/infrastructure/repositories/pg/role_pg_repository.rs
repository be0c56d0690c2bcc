use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::role::{NewRole, Role};
use crate::domain::repositories::role_repository::RoleRepository;
use super::map_sqlx_error;

pub struct RolePgRepository {
    pool: Arc<PgPool>,
}

impl RolePgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn row_to_role(row: &PgRow) -> Role {
        Role {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            permissions: row.get("permissions"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl RoleRepository for RolePgRepository {
    async fn create_role(&self, role: NewRole) -> Result<Role> {
        let row = sqlx::query(
            r#"
            INSERT INTO roles (name, description, permissions, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, name, description, permissions, created_at
            "#
        )
        .bind(&role.name)
        .bind(&role.description)
        .bind(&role.permissions)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Role", e))?;

        Ok(Self::row_to_role(&row))
    }

    async fn get_role(&self, id: i64) -> Result<Option<Role>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, permissions, created_at
            FROM roles
            WHERE id = $1 AND removed_at IS NULL
            "#
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Role", e))?;

        Ok(row.as_ref().map(Self::row_to_role))
    }

    async fn update_role(&self, role: &Role) -> Result<Role> {
        let row = sqlx::query(
            r#"
            UPDATE roles SET name = $2, description = $3, permissions = $4
            WHERE id = $1 AND removed_at IS NULL
            RETURNING id, name, description, permissions, created_at
            "#
        )
        .bind(role.id)
        .bind(&role.name)
        .bind(&role.description)
        .bind(&role.permissions)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Role", e))?;

        row.as_ref()
            .map(Self::row_to_role)
            .ok_or_else(|| DomainError::not_found("Role", role.id.to_string()))
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, permissions, created_at
            FROM roles
            WHERE removed_at IS NULL
            ORDER BY name, id
            "#
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Role", e))?;

        Ok(rows.iter().map(Self::row_to_role).collect())
    }
}
