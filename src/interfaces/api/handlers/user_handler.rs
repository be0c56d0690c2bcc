use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use crate::application::dtos::user_dto::{CreateUserDto, ListUsersQuery, UpdateUserDto};
use crate::common::di::AppState;
use crate::common::errors::AppError;
use crate::interfaces::api::handlers::trash_handler::trash_entity;
use crate::interfaces::middleware::auth::AuthUser;

/// Handler for employee endpoints
pub struct UserHandler;

impl UserHandler {
    pub async fn list_users(
        State(state): State<AppState>,
        Query(query): Query<ListUsersQuery>,
    ) -> Result<impl IntoResponse, AppError> {
        let users = state.user_service.list_users(query).await?;
        Ok(Json(users))
    }

    pub async fn get_user(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        let user = state.user_service.get_user(&id).await?;
        Ok(Json(user))
    }

    #[instrument(skip(state, dto))]
    pub async fn create_user(
        State(state): State<AppState>,
        Json(dto): Json<CreateUserDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let user = state.user_service.create_user(dto).await?;
        Ok((StatusCode::CREATED, Json(user)))
    }

    #[instrument(skip(state, dto))]
    pub async fn update_user(
        State(state): State<AppState>,
        Path(id): Path<String>,
        Json(dto): Json<UpdateUserDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let user = state.user_service.update_user(&id, dto).await?;
        Ok(Json(user))
    }

    /// Suspende la cuenta de acceso y mueve al usuario a la papelera
    #[instrument(skip(state))]
    pub async fn delete_user(
        State(state): State<AppState>,
        auth_user: AuthUser,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        trash_entity(&state, "User", &id, &auth_user).await
    }
}
