use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::application::dtos::role_dto::{CreateRoleDto, UpdateRoleDto};
use crate::common::di::AppState;
use crate::common::errors::AppError;
use crate::interfaces::api::handlers::trash_handler::trash_entity;
use crate::interfaces::middleware::auth::AuthUser;

/// Handler for role endpoints
pub struct RoleHandler;

impl RoleHandler {
    pub async fn list_roles(
        State(state): State<AppState>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.role_service.list_roles().await?))
    }

    pub async fn get_role(
        State(state): State<AppState>,
        Path(id): Path<i64>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.role_service.get_role(id).await?))
    }

    pub async fn create_role(
        State(state): State<AppState>,
        Json(dto): Json<CreateRoleDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let role = state.role_service.create_role(dto).await?;
        Ok((StatusCode::CREATED, Json(role)))
    }

    pub async fn update_role(
        State(state): State<AppState>,
        Path(id): Path<i64>,
        Json(dto): Json<UpdateRoleDto>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.role_service.update_role(id, dto).await?))
    }

    pub async fn delete_role(
        State(state): State<AppState>,
        auth_user: AuthUser,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        trash_entity(&state, "Role", &id, &auth_user).await
    }
}
