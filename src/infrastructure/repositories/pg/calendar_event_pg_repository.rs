use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::calendar_event::{CalendarEvent, NewCalendarEvent};
use crate::domain::repositories::calendar_event_repository::CalendarEventRepository;
use super::map_sqlx_error;

const EVENT_COLUMNS: &str = "id, title, description, starts_at, ends_at, all_day, created_by, created_at";

pub struct CalendarEventPgRepository {
    pool: Arc<PgPool>,
}

impl CalendarEventPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn row_to_event(row: &PgRow) -> CalendarEvent {
        CalendarEvent {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            starts_at: row.get("starts_at"),
            ends_at: row.get("ends_at"),
            all_day: row.get("all_day"),
            created_by: row.get("created_by"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl CalendarEventRepository for CalendarEventPgRepository {
    async fn create_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent> {
        // created_by solo se guarda si el autor existe en users
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO calendar_events (title, description, starts_at, ends_at, all_day, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, (SELECT id FROM users WHERE id = $6), NOW())
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.all_day)
        .bind(&event.created_by)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Event", e))?;

        Ok(Self::row_to_event(&row))
    }

    async fn get_event(&self, id: i64) -> Result<Option<CalendarEvent>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM calendar_events WHERE id = $1 AND removed_at IS NULL",
            EVENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Event", e))?;

        Ok(row.as_ref().map(Self::row_to_event))
    }

    async fn update_event(&self, event: &CalendarEvent) -> Result<CalendarEvent> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE calendar_events SET
                title = $2, description = $3, starts_at = $4, ends_at = $5, all_day = $6
            WHERE id = $1 AND removed_at IS NULL
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.starts_at)
        .bind(event.ends_at)
        .bind(event.all_day)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Event", e))?;

        row.as_ref()
            .map(Self::row_to_event)
            .ok_or_else(|| DomainError::not_found("Event", event.id.to_string()))
    }

    async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM calendar_events WHERE removed_at IS NULL ORDER BY starts_at, id",
            EVENT_COLUMNS
        ))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("Event", e))?;

        Ok(rows.iter().map(Self::row_to_event).collect())
    }
}
