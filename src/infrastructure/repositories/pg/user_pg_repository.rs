use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::user::{NewUser, User};
use crate::domain::repositories::user_repository::UserRepository;
use super::map_sqlx_error;

const USER_COLUMNS: &str = "id, email, first_name, last_name, position, department_id, role_id, hired_on, created_at";

pub struct UserPgRepository {
    pool: Arc<PgPool>,
}

impl UserPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> User {
        User {
            id: row.get("id"),
            email: row.get("email"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            position: row.get("position"),
            department_id: row.get("department_id"),
            role_id: row.get("role_id"),
            hired_on: row.get("hired_on"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl UserRepository for UserPgRepository {
    /// Crea un nuevo usuario
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (
                id, email, first_name, last_name, position,
                department_id, role_id, hired_on, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, NOW()
            )
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.position)
        .bind(user.department_id)
        .bind(user.role_id)
        .bind(user.hired_on)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("User", e))?;

        Ok(Self::row_to_user(&row))
    }

    /// Obtiene un usuario activo por ID
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1 AND removed_at IS NULL",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("User", e))?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    /// Actualiza un usuario existente
    async fn update_user(&self, user: &User) -> Result<User> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                position = $5,
                department_id = $6,
                role_id = $7,
                hired_on = $8
            WHERE id = $1 AND removed_at IS NULL
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.position)
        .bind(user.department_id)
        .bind(user.role_id)
        .bind(user.hired_on)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("User", e))?;

        row.as_ref()
            .map(Self::row_to_user)
            .ok_or_else(|| DomainError::not_found("User", user.id.clone()))
    }

    /// Lista usuarios con paginación
    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM users
            WHERE removed_at IS NULL
            ORDER BY last_name, first_name, id
            LIMIT $1 OFFSET $2
            "#,
            USER_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("User", e))?;

        Ok(rows.iter().map(Self::row_to_user).collect())
    }

    async fn count_users_in_department(&self, department_id: i64) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM users WHERE department_id = $1 AND removed_at IS NULL"
        )
        .bind(department_id)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("User", e))?;

        Ok(row.get("total"))
    }

    async fn count_users_with_role(&self, role_id: i64) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM users WHERE role_id = $1 AND removed_at IS NULL"
        )
        .bind(role_id)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("User", e))?;

        Ok(row.get("total"))
    }
}
