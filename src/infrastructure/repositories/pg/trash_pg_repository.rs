use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Connection, PgConnection, PgPool, Row};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::common::errors::{DomainError, ErrorKind, Result};
use crate::domain::entities::trashed_item::{TrashPayload, TrashRecord, TrashedItem, TrashedItemType};
use crate::domain::repositories::trash_repository::{CascadeStep, CascadeWarning, PurgeResult, TrashRepository};
use super::map_sqlx_error;

const TRASH_COLUMNS: &str = "id, original_id, item_type, item_data, deleted_at, deleted_by";

/// Tabla de origen y expresión del id para cada tipo (los ids se guardan como texto en `trash`)
fn origin_table(item_type: TrashedItemType) -> (&'static str, &'static str) {
    match item_type {
        TrashedItemType::User => ("users", "$1"),
        TrashedItemType::Department => ("departments", "$1::bigint"),
        TrashedItemType::Role => ("roles", "$1::bigint"),
        TrashedItemType::Request => ("time_off_requests", "$1::bigint"),
        TrashedItemType::Event => ("calendar_events", "$1::bigint"),
    }
}

fn cascade_sql(step: CascadeStep) -> &'static str {
    match step {
        CascadeStep::DetachTrashActor => "UPDATE trash SET deleted_by = NULL WHERE deleted_by = $1",
        CascadeStep::TimeOffRequests => "DELETE FROM time_off_requests WHERE user_id = $1",
        CascadeStep::OvertimeRequests => "DELETE FROM overtime_requests WHERE user_id = $1",
        CascadeStep::OfficialBusinessRequests => "DELETE FROM official_business_requests WHERE user_id = $1",
        CascadeStep::OffsetRequests => "DELETE FROM offset_requests WHERE user_id = $1",
        CascadeStep::LeaveCredits => "DELETE FROM leave_credits WHERE user_id = $1",
    }
}

/**
 * Papelera respaldada por PostgreSQL.
 *
 * Las filas de origen nunca se borran al eliminar: se marcan con `removed_at` en la
 * misma transacción que inserta el registro de papelera. Cada paso de la cascada corre
 * en su propio savepoint para que un fallo se revierta sin arrastrar al resto.
 */
pub struct TrashPgRepository {
    pool: Arc<PgPool>,
}

impl TrashPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &PgRow) -> TrashRecord {
        TrashRecord {
            id: row.get("id"),
            original_id: row.get("original_id"),
            item_type: row.get("item_type"),
            item_data: row.get("item_data"),
            deleted_at: row.get("deleted_at"),
            deleted_by: row.get("deleted_by"),
        }
    }

    /// Ejecuta un paso de la cascada dentro de un savepoint
    async fn run_cascade_step(conn: &mut PgConnection, step: CascadeStep, user_id: &str) -> std::result::Result<u64, sqlx::Error> {
        let mut savepoint = conn.begin().await?;

        match sqlx::query(cascade_sql(step)).bind(user_id).execute(&mut *savepoint).await {
            Ok(result) => {
                savepoint.commit().await?;
                Ok(result.rows_affected())
            },
            Err(e) => {
                savepoint.rollback().await?;
                Err(e)
            }
        }
    }

    /// Suelta `department_id` / `role_id` de un usuario marcado cuando apuntan a filas
    /// que también están marcadas
    async fn detach_removed_references(conn: &mut PgConnection, user_id: &str) -> std::result::Result<Vec<CascadeWarning>, sqlx::Error> {
        let mut warnings = Vec::new();

        for (column, table, label) in [("department_id", "departments", "Department"), ("role_id", "roles", "Role")] {
            let detached: Option<i64> = sqlx::query_scalar(&format!(
                r#"
                UPDATE users SET {column} = NULL
                FROM {table} t
                WHERE users.id = $1 AND users.removed_at IS NOT NULL
                  AND t.id = users.{column} AND t.removed_at IS NOT NULL
                RETURNING t.id
                "#,
                column = column,
                table = table
            ))
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?;

            if let Some(id) = detached {
                warnings.push(CascadeWarning::new(
                    format!("users.{}", column),
                    format!("{} {} is in the trash; reference cleared", label, id),
                ));
            }
        }

        Ok(warnings)
    }

    /// Vuelve a escribir la instantánea en su tabla. Devuelve las filas afectadas:
    /// 0 significa que existe una fila activa con el mismo id.
    async fn write_back(conn: &mut PgConnection, payload: &TrashPayload) -> std::result::Result<u64, sqlx::Error> {
        let result = match payload {
            TrashPayload::User(user) => {
                sqlx::query("UPDATE users SET removed_at = NULL WHERE id = $1 AND removed_at IS NOT NULL")
                    .bind(&user.id)
                    .execute(&mut *conn)
                    .await?
            },
            TrashPayload::Department(department) => {
                sqlx::query(
                    r#"
                    INSERT INTO departments (id, name, description, created_at, removed_at)
                    VALUES ($1, $2, $3, $4, NULL)
                    ON CONFLICT (id) DO UPDATE SET
                        name = EXCLUDED.name,
                        description = EXCLUDED.description,
                        created_at = EXCLUDED.created_at,
                        removed_at = NULL
                    WHERE departments.removed_at IS NOT NULL
                    "#
                )
                .bind(department.id)
                .bind(&department.name)
                .bind(&department.description)
                .bind(department.created_at)
                .execute(&mut *conn)
                .await?
            },
            TrashPayload::Role(role) => {
                sqlx::query(
                    r#"
                    INSERT INTO roles (id, name, description, permissions, created_at, removed_at)
                    VALUES ($1, $2, $3, $4, $5, NULL)
                    ON CONFLICT (id) DO UPDATE SET
                        name = EXCLUDED.name,
                        description = EXCLUDED.description,
                        permissions = EXCLUDED.permissions,
                        created_at = EXCLUDED.created_at,
                        removed_at = NULL
                    WHERE roles.removed_at IS NOT NULL
                    "#
                )
                .bind(role.id)
                .bind(&role.name)
                .bind(&role.description)
                .bind(&role.permissions)
                .bind(role.created_at)
                .execute(&mut *conn)
                .await?
            },
            TrashPayload::Request(request) => {
                sqlx::query(
                    r#"
                    INSERT INTO time_off_requests (
                        id, user_id, leave_type, start_date, end_date, half_day, reason,
                        status, reviewed_by, reviewed_at, created_at, removed_at
                    ) VALUES (
                        $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NULL
                    )
                    ON CONFLICT (id) DO UPDATE SET
                        user_id = EXCLUDED.user_id,
                        leave_type = EXCLUDED.leave_type,
                        start_date = EXCLUDED.start_date,
                        end_date = EXCLUDED.end_date,
                        half_day = EXCLUDED.half_day,
                        reason = EXCLUDED.reason,
                        status = EXCLUDED.status,
                        reviewed_by = EXCLUDED.reviewed_by,
                        reviewed_at = EXCLUDED.reviewed_at,
                        created_at = EXCLUDED.created_at,
                        removed_at = NULL
                    WHERE time_off_requests.removed_at IS NOT NULL
                    "#
                )
                .bind(request.id)
                .bind(&request.user_id)
                .bind(&request.leave_type)
                .bind(request.start_date)
                .bind(request.end_date)
                .bind(request.half_day)
                .bind(&request.reason)
                .bind(request.status.to_string())
                .bind(&request.reviewed_by)
                .bind(request.reviewed_at)
                .bind(request.created_at)
                .execute(&mut *conn)
                .await?
            },
            TrashPayload::Event(event) => {
                sqlx::query(
                    r#"
                    INSERT INTO calendar_events (
                        id, title, description, starts_at, ends_at, all_day, created_by, created_at, removed_at
                    ) VALUES (
                        $1, $2, $3, $4, $5, $6, $7, $8, NULL
                    )
                    ON CONFLICT (id) DO UPDATE SET
                        title = EXCLUDED.title,
                        description = EXCLUDED.description,
                        starts_at = EXCLUDED.starts_at,
                        ends_at = EXCLUDED.ends_at,
                        all_day = EXCLUDED.all_day,
                        created_by = EXCLUDED.created_by,
                        created_at = EXCLUDED.created_at,
                        removed_at = NULL
                    WHERE calendar_events.removed_at IS NOT NULL
                    "#
                )
                .bind(event.id)
                .bind(&event.title)
                .bind(&event.description)
                .bind(event.starts_at)
                .bind(event.ends_at)
                .bind(event.all_day)
                .bind(&event.created_by)
                .bind(event.created_at)
                .execute(&mut *conn)
                .await?
            },
        };

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TrashRepository for TrashPgRepository {
    async fn add_to_trash(&self, item: &TrashedItem, cascade: &[CascadeStep]) -> Result<Vec<CascadeWarning>> {
        let record = item.to_record()?;

        let mut tx = self.pool.begin().await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        // Un autor que no existe en users se guarda como NULL
        sqlx::query(
            r#"
            INSERT INTO trash (id, original_id, item_type, item_data, deleted_at, deleted_by)
            VALUES ($1, $2, $3, $4, $5, (SELECT id FROM users WHERE id = $6))
            "#
        )
        .bind(record.id)
        .bind(&record.original_id)
        .bind(&record.item_type)
        .bind(&record.item_data)
        .bind(record.deleted_at)
        .bind(&record.deleted_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Trash", e))?;

        let mut warnings = Vec::new();
        for step in cascade {
            match Self::run_cascade_step(&mut tx, *step, &record.original_id).await {
                Ok(affected) => {
                    debug!("Cascada {}: {} filas", step.name(), affected);
                },
                Err(e) => {
                    warn!("Paso de cascada {} fallido para {}: {}", step.name(), record.original_id, e);
                    warnings.push(CascadeWarning::new(step.name(), e.to_string()));
                }
            }
        }

        let (table, id_expr) = origin_table(item.item_type());
        let flagged = sqlx::query(&format!(
            "UPDATE {} SET removed_at = $2 WHERE id = {} AND removed_at IS NULL",
            table, id_expr
        ))
        .bind(&record.original_id)
        .bind(record.deleted_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Trash", e))?
        .rows_affected();

        if flagged == 0 {
            // La fila desapareció o ya estaba marcada; la transacción se revierte al soltarla
            return Err(DomainError::not_found(item.item_type().as_str(), record.original_id.clone()));
        }

        tx.commit().await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        info!("{} {} movido a papelera ({})", record.item_type, record.original_id, record.id);
        Ok(warnings)
    }

    async fn get_trash_items(&self) -> Result<Vec<TrashRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM trash ORDER BY deleted_at DESC, id",
            TRASH_COLUMNS
        ))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Trash", e))?;

        Ok(rows.iter().map(Self::row_to_record).collect())
    }

    async fn get_trash_item(&self, id: &Uuid) -> Result<Option<TrashRecord>> {
        let row = sqlx::query(&format!("SELECT {} FROM trash WHERE id = $1", TRASH_COLUMNS))
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        Ok(row.as_ref().map(Self::row_to_record))
    }

    async fn restore_from_trash(&self, item: &TrashedItem) -> Result<Vec<CascadeWarning>> {
        let mut tx = self.pool.begin().await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        let warnings = match &item.payload {
            TrashPayload::User(user) => Self::detach_removed_references(&mut tx, &user.id).await
                .map_err(|e| map_sqlx_error("User", e))?,
            _ => Vec::new(),
        };

        let written = Self::write_back(&mut tx, &item.payload).await
            .map_err(|e| map_sqlx_error(item.item_type().as_str(), e))?;

        if written == 0 {
            let message = match item.item_type() {
                TrashedItemType::User => format!("User {} is not marked as removed", item.original_id()),
                other => format!("An active {} with id {} already exists", other, item.original_id()),
            };
            return Err(DomainError::new(ErrorKind::AlreadyExists, item.item_type().as_str(), message)
                .with_id(item.original_id()));
        }

        sqlx::query("DELETE FROM trash WHERE id = $1")
            .bind(item.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        tx.commit().await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        debug!("{} {} restaurado ({})", item.item_type(), item.original_id(), item.id);
        Ok(warnings)
    }

    async fn delete_permanently(&self, id: &Uuid) -> Result<Option<PurgeResult>> {
        let mut tx = self.pool.begin().await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        let row = sqlx::query(&format!("DELETE FROM trash WHERE id = $1 RETURNING {}", TRASH_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        let record = match row {
            Some(row) => Self::row_to_record(&row),
            None => return Ok(None),
        };

        let mut warnings = Vec::new();
        let mut origin_purged = false;

        // Con una etiqueta desconocida no hay fila de origen que purgar
        if let Ok(item_type) = record.item_type.parse::<TrashedItemType>() {
            let (table, id_expr) = origin_table(item_type);
            let sql = format!(
                r#"
                DELETE FROM {table} WHERE id = {id_expr} AND removed_at IS NOT NULL
                AND NOT EXISTS (SELECT 1 FROM trash WHERE item_type = $2 AND original_id = $1)
                "#,
                table = table,
                id_expr = id_expr
            );

            let mut savepoint = tx.begin().await
                .map_err(|e| map_sqlx_error("Trash", e))?;
            match sqlx::query(&sql)
                .bind(&record.original_id)
                .bind(&record.item_type)
                .execute(&mut *savepoint)
                .await
            {
                Ok(result) => {
                    savepoint.commit().await
                        .map_err(|e| map_sqlx_error("Trash", e))?;
                    origin_purged = result.rows_affected() > 0;
                },
                Err(e) => {
                    error!("No se pudo purgar {} {}: {}", record.item_type, record.original_id, e);
                    savepoint.rollback().await
                        .map_err(|e| map_sqlx_error("Trash", e))?;
                    warnings.push(CascadeWarning::new(format!("{}.purge", table), e.to_string()));
                }
            }
        }

        tx.commit().await
            .map_err(|e| map_sqlx_error("Trash", e))?;

        info!("Registro {} eliminado definitivamente (origen purgado: {})", record.id, origin_purged);
        Ok(Some(PurgeResult {
            record,
            origin_purged,
            warnings,
        }))
    }

    async fn get_expired_items(&self, cutoff: DateTime<Utc>) -> Result<Vec<TrashRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM trash WHERE deleted_at < $1 ORDER BY deleted_at",
            TRASH_COLUMNS
        ))
        .bind(cutoff)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Trash", e))?;

        Ok(rows.iter().map(Self::row_to_record).collect())
    }
}
