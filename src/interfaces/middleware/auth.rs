use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::common::di::AppState;
use crate::domain::services::auth_service::AuthError as TokenError;

// Extensión para almacenar datos del usuario autenticado
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

// Estructura para usar en extractores de Axum
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub role: String,
}

// Error para las operaciones de autenticación
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token no proporcionado")]
    TokenNotProvided,

    #[error("Token inválido: {0}")]
    InvalidToken(String),

    #[error("Token expirado")]
    TokenExpired,

    #[error("Usuario no autenticado")]
    UserNotFound,

    #[error("Acceso denegado: {0}")]
    AccessDenied(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::TokenExpired => AuthError::TokenExpired,
            TokenError::InvalidToken(msg) | TokenError::InternalError(msg) => AuthError::InvalidToken(msg),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::AccessDenied(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        };

        let body = axum::Json(serde_json::json!({
            "error": if status == StatusCode::FORBIDDEN { "Forbidden" } else { "Unauthorized" },
            "details": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<CurrentUser>()
            .map(|user| AuthUser {
                id: user.id.clone(),
                role: user.role.clone(),
            })
            .ok_or(AuthError::UserNotFound)
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Valida el token del proveedor de autenticación y deja `CurrentUser` en la request
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(&request).ok_or(AuthError::TokenNotProvided)?;

    let claims = state.auth_service.validate_token(token).map_err(|e| {
        tracing::debug!("Token rechazado: {}", e);
        AuthError::from(e)
    })?;

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
    };

    request.extensions_mut().insert(current_user);
    Ok(next.run(request).await)
}

/// Solo deja pasar a usuarios con el rol de administrador configurado
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let current_user = request.extensions()
        .get::<CurrentUser>()
        .ok_or(AuthError::UserNotFound)?;

    if current_user.role != state.config.auth.admin_role {
        tracing::warn!("Acceso denegado a {} ({}): se requiere rol {}",
                       current_user.id, current_user.role, state.config.auth.admin_role);
        return Err(AuthError::AccessDenied("Se requiere rol de administrador".to_string()));
    }

    Ok(next.run(request).await)
}
