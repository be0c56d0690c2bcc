use async_trait::async_trait;

use crate::common::errors::Result;
use crate::domain::entities::calendar_event::{CalendarEvent, NewCalendarEvent};

#[async_trait]
pub trait CalendarEventRepository: Send + Sync + 'static {
    async fn create_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent>;

    async fn get_event(&self, id: i64) -> Result<Option<CalendarEvent>>;

    async fn update_event(&self, event: &CalendarEvent) -> Result<CalendarEvent>;

    async fn list_events(&self) -> Result<Vec<CalendarEvent>>;
}
