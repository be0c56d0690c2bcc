use std::sync::Arc;
use tracing::{debug, instrument};

use crate::application::dtos::calendar_event_dto::{CreateCalendarEventDto, UpdateCalendarEventDto};
use crate::common::errors::{DomainError, Result};
use crate::domain::entities::calendar_event::{validate_schedule, CalendarEvent, NewCalendarEvent};
use crate::domain::repositories::calendar_event_repository::CalendarEventRepository;

pub struct CalendarEventService {
    event_repository: Arc<dyn CalendarEventRepository>,
}

impl CalendarEventService {
    pub fn new(event_repository: Arc<dyn CalendarEventRepository>) -> Self {
        Self { event_repository }
    }

    #[instrument(skip(self, dto))]
    pub async fn create_event(&self, dto: CreateCalendarEventDto, created_by: &str) -> Result<CalendarEvent> {
        let new_event = NewCalendarEvent::new(
            dto.title,
            dto.description,
            dto.starts_at,
            dto.ends_at,
            dto.all_day,
            Some(created_by.to_string()),
        )?;

        let event = self.event_repository.create_event(new_event).await?;
        debug!("Evento creado: {} ({})", event.title, event.id);
        Ok(event)
    }

    pub async fn get_event(&self, id: i64) -> Result<CalendarEvent> {
        self.event_repository.get_event(id).await?
            .ok_or_else(|| DomainError::not_found("Event", id.to_string()))
    }

    #[instrument(skip(self, dto))]
    pub async fn update_event(&self, id: i64, dto: UpdateCalendarEventDto) -> Result<CalendarEvent> {
        let mut event = self.get_event(id).await?;

        if let Some(title) = dto.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(DomainError::validation_error("Event", "Event title is required"));
            }
            event.title = title;
        }
        if dto.description.is_some() {
            event.description = dto.description;
        }
        if let Some(starts_at) = dto.starts_at {
            event.starts_at = starts_at;
        }
        if dto.ends_at.is_some() {
            event.ends_at = dto.ends_at;
        }
        if let Some(all_day) = dto.all_day {
            event.all_day = all_day;
        }
        validate_schedule(event.starts_at, event.ends_at)?;

        self.event_repository.update_event(&event).await
    }

    pub async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        self.event_repository.list_events().await
    }
}
