use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::application::dtos::calendar_event_dto::{CreateCalendarEventDto, UpdateCalendarEventDto};
use crate::common::di::AppState;
use crate::common::errors::AppError;
use crate::interfaces::api::handlers::trash_handler::trash_entity;
use crate::interfaces::middleware::auth::AuthUser;

/// Handler for calendar event endpoints
pub struct CalendarEventHandler;

impl CalendarEventHandler {
    pub async fn list_events(
        State(state): State<AppState>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.calendar_event_service.list_events().await?))
    }

    pub async fn get_event(
        State(state): State<AppState>,
        Path(id): Path<i64>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.calendar_event_service.get_event(id).await?))
    }

    /// El autor del evento es el usuario autenticado
    pub async fn create_event(
        State(state): State<AppState>,
        auth_user: AuthUser,
        Json(dto): Json<CreateCalendarEventDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let event = state.calendar_event_service.create_event(dto, &auth_user.id).await?;
        Ok((StatusCode::CREATED, Json(event)))
    }

    pub async fn update_event(
        State(state): State<AppState>,
        Path(id): Path<i64>,
        Json(dto): Json<UpdateCalendarEventDto>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.calendar_event_service.update_event(id, dto).await?))
    }

    pub async fn delete_event(
        State(state): State<AppState>,
        auth_user: AuthUser,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        trash_entity(&state, "Event", &id, &auth_user).await
    }
}
