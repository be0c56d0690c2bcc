use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::{debug, error, instrument};

use crate::application::dtos::trash_dto::{DeletePermanentlyQuery, DeletionOutcomeDto, RestoreFromTrashRequest};
use crate::common::di::AppState;
use crate::common::errors::{AppError, DomainError};
use crate::interfaces::middleware::auth::AuthUser;

fn required_trash_id(trash_id: Option<String>) -> Result<String, AppError> {
    trash_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| DomainError::validation_error("Trash", "trashId is required").into())
}

/// Mueve una entidad a la papelera; lo usan los DELETE de cada colección
pub async fn trash_entity(
    state: &AppState,
    item_type: &str,
    item_id: &str,
    auth_user: &AuthUser,
) -> Result<Json<DeletionOutcomeDto>, AppError> {
    debug!("Solicitud para mover a papelera: tipo={}, id={}, usuario={}",
           item_type, item_id, auth_user.id);

    let outcome = state.trash_service.move_to_trash(item_type, item_id, &auth_user.id).await
        .map_err(|e| {
            error!("Error al mover {} {} a papelera: {}", item_type, item_id, e);
            AppError::from(e)
        })?;

    Ok(Json(outcome))
}

/// Obtiene todos los elementos en la papelera
#[instrument(skip(state))]
pub async fn get_trash_items(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> impl IntoResponse {
    debug!("Solicitud para listar la papelera de {}", auth_user.id);

    match state.trash_service.get_trash_items().await {
        Ok(items) => {
            debug!("Encontrados {} elementos en la papelera", items.len());
            (StatusCode::OK, Json(json!(items))).into_response()
        },
        Err(e) => {
            error!("Error al obtener elementos de la papelera: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({
                "error": "Failed to fetch trash items",
                "details": e.message,
                "items": [],
            }))).into_response()
        }
    }
}

/// Restaura un elemento desde la papelera a su tabla de origen
#[instrument(skip(state, body))]
pub async fn restore_from_trash(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(body): Json<RestoreFromTrashRequest>,
) -> Result<impl IntoResponse, AppError> {
    let trash_id = required_trash_id(body.trash_id)?;
    debug!("Solicitud de {} para restaurar {}", auth_user.id, trash_id);

    let result = state.trash_service.restore_item(&trash_id).await
        .map_err(|e| {
            error!("Error al restaurar elemento de papelera: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(result))
}

/// Elimina permanentemente un elemento: `DELETE /api/trash?trashId=...`
#[instrument(skip(state))]
pub async fn delete_permanently_by_query(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<DeletePermanentlyQuery>,
) -> Result<impl IntoResponse, AppError> {
    let trash_id = required_trash_id(query.trash_id)?;
    purge(&state, &trash_id, &auth_user).await
}

/// Elimina permanentemente un elemento: `DELETE /api/trash/{trash_id}`
#[instrument(skip(state))]
pub async fn delete_permanently(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(trash_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    purge(&state, &trash_id, &auth_user).await
}

async fn purge(state: &AppState, trash_id: &str, auth_user: &AuthUser) -> Result<impl IntoResponse, AppError> {
    debug!("Solicitud de {} para eliminar permanentemente {}", auth_user.id, trash_id);

    let result = state.trash_service.delete_permanently(trash_id).await
        .map_err(|e| {
            error!("Error al eliminar permanentemente elemento: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(result))
}

/// Vacía la papelera completamente
#[instrument(skip(state))]
pub async fn empty_trash(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    debug!("Solicitud de {} para vaciar la papelera", auth_user.id);

    let result = state.trash_service.empty_trash().await
        .map_err(|e| {
            error!("Error al vaciar papelera: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(result))
}
