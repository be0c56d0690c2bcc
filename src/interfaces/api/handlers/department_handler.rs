use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::application::dtos::department_dto::{CreateDepartmentDto, UpdateDepartmentDto};
use crate::common::di::AppState;
use crate::common::errors::AppError;
use crate::interfaces::api::handlers::trash_handler::trash_entity;
use crate::interfaces::middleware::auth::AuthUser;

/// Handler for department endpoints
pub struct DepartmentHandler;

impl DepartmentHandler {
    pub async fn list_departments(
        State(state): State<AppState>,
    ) -> Result<impl IntoResponse, AppError> {
        let departments = state.department_service.list_departments().await?;
        Ok(Json(departments))
    }

    pub async fn get_department(
        State(state): State<AppState>,
        Path(id): Path<i64>,
    ) -> Result<impl IntoResponse, AppError> {
        let department = state.department_service.get_department(id).await?;
        Ok(Json(department))
    }

    pub async fn create_department(
        State(state): State<AppState>,
        Json(dto): Json<CreateDepartmentDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let department = state.department_service.create_department(dto).await?;
        Ok((StatusCode::CREATED, Json(department)))
    }

    pub async fn update_department(
        State(state): State<AppState>,
        Path(id): Path<i64>,
        Json(dto): Json<UpdateDepartmentDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let department = state.department_service.update_department(id, dto).await?;
        Ok(Json(department))
    }

    /// Falla con 409 mientras queden usuarios activos en el departamento
    pub async fn delete_department(
        State(state): State<AppState>,
        auth_user: AuthUser,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        trash_entity(&state, "Department", &id, &auth_user).await
    }
}
