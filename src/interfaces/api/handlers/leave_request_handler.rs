use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use crate::application::dtos::leave_request_dto::{
    CreateLeaveRequestDto, ListRequestsQuery, SetBalanceDto, UpdateLeaveRequestDto,
};
use crate::common::di::AppState;
use crate::common::errors::AppError;
use crate::interfaces::api::handlers::trash_handler::trash_entity;
use crate::interfaces::middleware::auth::AuthUser;

/// Handler for leave requests and leave credits
pub struct LeaveRequestHandler;

impl LeaveRequestHandler {
    pub async fn list_requests(
        State(state): State<AppState>,
        Query(query): Query<ListRequestsQuery>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.leave_request_service.list_requests(query).await?))
    }

    pub async fn get_request(
        State(state): State<AppState>,
        Path(id): Path<i64>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.leave_request_service.get_request(id).await?))
    }

    pub async fn create_request(
        State(state): State<AppState>,
        Json(dto): Json<CreateLeaveRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        let request = state.leave_request_service.create_request(dto).await?;
        Ok((StatusCode::CREATED, Json(request)))
    }

    pub async fn update_request(
        State(state): State<AppState>,
        Path(id): Path<i64>,
        Json(dto): Json<UpdateLeaveRequestDto>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.leave_request_service.update_request(id, dto).await?))
    }

    /// Aprueba y descuenta los créditos del solicitante
    #[instrument(skip(state))]
    pub async fn approve_request(
        State(state): State<AppState>,
        auth_user: AuthUser,
        Path(id): Path<i64>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.leave_request_service.approve_request(id, &auth_user.id).await?))
    }

    #[instrument(skip(state))]
    pub async fn reject_request(
        State(state): State<AppState>,
        auth_user: AuthUser,
        Path(id): Path<i64>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.leave_request_service.reject_request(id, &auth_user.id).await?))
    }

    pub async fn delete_request(
        State(state): State<AppState>,
        auth_user: AuthUser,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        trash_entity(&state, "Request", &id, &auth_user).await
    }

    pub async fn get_credit(
        State(state): State<AppState>,
        Path(user_id): Path<String>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.leave_request_service.get_credit(&user_id).await?))
    }

    #[instrument(skip(state, dto))]
    pub async fn set_balance(
        State(state): State<AppState>,
        Path(user_id): Path<String>,
        Json(dto): Json<SetBalanceDto>,
    ) -> Result<impl IntoResponse, AppError> {
        Ok(Json(state.leave_request_service.set_balance(&user_id, dto.balance).await?))
    }
}
