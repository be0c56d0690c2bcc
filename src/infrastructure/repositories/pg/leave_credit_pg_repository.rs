use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::common::errors::Result;
use crate::domain::entities::leave_credit::LeaveCredit;
use crate::domain::repositories::leave_credit_repository::LeaveCreditRepository;
use super::map_sqlx_error;

pub struct LeaveCreditPgRepository {
    pool: Arc<PgPool>,
}

impl LeaveCreditPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn row_to_credit(row: &PgRow) -> LeaveCredit {
        LeaveCredit {
            user_id: row.get("user_id"),
            balance: row.get("balance"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl LeaveCreditRepository for LeaveCreditPgRepository {
    async fn get_credit(&self, user_id: &str) -> Result<Option<LeaveCredit>> {
        let row = sqlx::query(
            "SELECT user_id, balance, updated_at FROM leave_credits WHERE user_id = $1"
        )
        .bind(user_id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("LeaveCredit", e))?;

        Ok(row.as_ref().map(Self::row_to_credit))
    }

    async fn set_balance(&self, user_id: &str, balance: f64) -> Result<LeaveCredit> {
        let row = sqlx::query(
            r#"
            INSERT INTO leave_credits (user_id, balance, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE
                SET balance = EXCLUDED.balance, updated_at = EXCLUDED.updated_at
            RETURNING user_id, balance, updated_at
            "#
        )
        .bind(user_id)
        .bind(balance)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("LeaveCredit", e))?;

        Ok(Self::row_to_credit(&row))
    }
}
