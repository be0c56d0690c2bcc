use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;
use tracing::debug;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::leave_request::{LeaveRequest, NewLeaveRequest, RequestStatus};
use crate::domain::repositories::leave_request_repository::LeaveRequestRepository;
use super::map_sqlx_error;

const REQUEST_COLUMNS: &str =
    "id, user_id, leave_type, start_date, end_date, half_day, reason, status, reviewed_by, reviewed_at, created_at";

pub struct LeaveRequestPgRepository {
    pool: Arc<PgPool>,
}

impl LeaveRequestPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub(crate) fn row_to_request(row: &PgRow) -> Result<LeaveRequest> {
        let status: String = row.get("status");

        Ok(LeaveRequest {
            id: row.get("id"),
            user_id: row.get("user_id"),
            leave_type: row.get("leave_type"),
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            half_day: row.get("half_day"),
            reason: row.get("reason"),
            status: status.parse::<RequestStatus>()?,
            reviewed_by: row.get("reviewed_by"),
            reviewed_at: row.get("reviewed_at"),
            created_at: row.get("created_at"),
        })
    }

    /// Cierra una solicitud pendiente; `None` si ya no estaba pendiente
    async fn review(
        conn: &mut sqlx::PgConnection,
        id: i64,
        reviewer: &str,
        status: RequestStatus,
    ) -> Result<Option<LeaveRequest>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE time_off_requests SET
                status = $2,
                reviewed_by = (SELECT id FROM users WHERE id = $3),
                reviewed_at = NOW()
            WHERE id = $1 AND status = 'pending' AND removed_at IS NULL
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(id)
        .bind(status.to_string())
        .bind(reviewer)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("Request", e))?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    fn not_pending(id: i64) -> DomainError {
        DomainError::conflict("Request", format!("Request {} is no longer pending", id)).with_id(id.to_string())
    }
}

#[async_trait]
impl LeaveRequestRepository for LeaveRequestPgRepository {
    async fn create_request(&self, request: NewLeaveRequest) -> Result<LeaveRequest> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO time_off_requests (
                user_id, leave_type, start_date, end_date, half_day, reason, status, created_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, 'pending', NOW()
            )
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(&request.user_id)
        .bind(&request.leave_type)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.half_day)
        .bind(&request.reason)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Request", e))?;

        Self::row_to_request(&row)
    }

    async fn get_request(&self, id: i64) -> Result<Option<LeaveRequest>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM time_off_requests WHERE id = $1 AND removed_at IS NULL",
            REQUEST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Request", e))?;

        row.as_ref().map(Self::row_to_request).transpose()
    }

    async fn update_request(&self, request: &LeaveRequest) -> Result<LeaveRequest> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE time_off_requests SET
                leave_type = $2, start_date = $3, end_date = $4, half_day = $5, reason = $6
            WHERE id = $1 AND removed_at IS NULL
            RETURNING {}
            "#,
            REQUEST_COLUMNS
        ))
        .bind(request.id)
        .bind(&request.leave_type)
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.half_day)
        .bind(&request.reason)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Request", e))?;

        match row {
            Some(row) => Self::row_to_request(&row),
            None => Err(DomainError::not_found("Request", request.id.to_string())),
        }
    }

    async fn list_requests(&self, user_id: Option<&str>) -> Result<Vec<LeaveRequest>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM time_off_requests
            WHERE removed_at IS NULL AND ($1::text IS NULL OR user_id = $1)
            ORDER BY created_at DESC, id DESC
            "#,
            REQUEST_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Request", e))?;

        rows.iter().map(Self::row_to_request).collect()
    }

    async fn approve_request(&self, id: i64, reviewer: &str, cost: f64) -> Result<LeaveRequest> {
        let mut tx = self.pool.begin().await
            .map_err(|e| map_sqlx_error("Request", e))?;

        let row = sqlx::query(&format!(
            "SELECT {} FROM time_off_requests WHERE id = $1 AND removed_at IS NULL FOR UPDATE",
            REQUEST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("Request", e))?
        .ok_or_else(|| DomainError::not_found("Request", id.to_string()))?;
        let request = Self::row_to_request(&row)?;

        if !request.is_pending() {
            return Err(Self::not_pending(id));
        }

        // Sin fila de créditos el saldo es 0
        let balance: f64 = sqlx::query("SELECT balance FROM leave_credits WHERE user_id = $1 FOR UPDATE")
            .bind(&request.user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("LeaveCredit", e))?
            .map(|row| row.get("balance"))
            .unwrap_or(0.0);

        if balance - cost < 0.0 {
            return Err(DomainError::conflict(
                "LeaveCredit",
                format!("Insufficient leave credits: balance {} is less than {}", balance, cost),
            ).with_id(request.user_id.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO leave_credits (user_id, balance, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE
                SET balance = EXCLUDED.balance, updated_at = EXCLUDED.updated_at
            "#
        )
        .bind(&request.user_id)
        .bind(balance - cost)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("LeaveCredit", e))?;

        let approved = Self::review(&mut tx, id, reviewer, RequestStatus::Approved).await?
            .ok_or_else(|| Self::not_pending(id))?;

        tx.commit().await
            .map_err(|e| map_sqlx_error("Request", e))?;

        debug!("Saldo de {} actualizado: {} -> {}", request.user_id, balance, balance - cost);
        Ok(approved)
    }

    async fn reject_request(&self, id: i64, reviewer: &str) -> Result<LeaveRequest> {
        let mut conn = self.pool.acquire().await
            .map_err(|e| map_sqlx_error("Request", e))?;

        let reviewed = Self::review(&mut conn, id, reviewer, RequestStatus::Rejected).await?;
        // Devolver la conexión antes de la consulta de respaldo, que toma otra del pool
        drop(conn);

        match reviewed {
            Some(rejected) => Ok(rejected),
            None => match self.get_request(id).await? {
                Some(_) => Err(Self::not_pending(id)),
                None => Err(DomainError::not_found("Request", id.to_string())),
            },
        }
    }
}
