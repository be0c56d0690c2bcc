use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::errors::{DomainError, Result};

/// Evento del calendario compartido
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCalendarEvent {
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub all_day: bool,
    pub created_by: Option<String>,
}

impl NewCalendarEvent {
    pub fn new(
        title: String,
        description: Option<String>,
        starts_at: DateTime<Utc>,
        ends_at: Option<DateTime<Utc>>,
        all_day: bool,
        created_by: Option<String>,
    ) -> Result<Self> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::validation_error("Event", "Event title is required"));
        }
        validate_schedule(starts_at, ends_at)?;

        Ok(Self { title, description, starts_at, ends_at, all_day, created_by })
    }
}

pub fn validate_schedule(starts_at: DateTime<Utc>, ends_at: Option<DateTime<Utc>>) -> Result<()> {
    if let Some(ends_at) = ends_at {
        if ends_at < starts_at {
            return Err(DomainError::validation_error("Event", "ends_at must not be before starts_at"));
        }
    }
    Ok(())
}
