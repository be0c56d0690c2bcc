use jsonwebtoken::{encode, decode, Header, Validation, EncodingKey, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};
use uuid::Uuid;
use chrono::Utc;

use crate::common::errors::{DomainError, ErrorKind};

/**
 * JWT claims structure for authentication tokens.
 *
 * Tokens are issued by the external auth provider; this service only checks
 * them. `sub` carries the user id that also keys the `users` table.
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier - contains the user ID
    pub sub: String,

    /// Expiration timestamp (seconds since Unix epoch)
    pub exp: i64,

    /// Issued at timestamp (seconds since Unix epoch)
    #[serde(default)]
    pub iat: i64,

    /// JWT unique ID
    #[serde(default)]
    pub jti: String,

    #[serde(default)]
    pub email: String,

    /// User role for authorization checks
    #[serde(default)]
    pub role: String,
}

/**
 * Authentication-specific error types.
 */
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Returned when a JWT token has passed its expiration time
    #[error("Token expirado")]
    TokenExpired,

    /// Returned when a JWT token is malformed or has invalid signature
    #[error("Token inválido: {0}")]
    InvalidToken(String),

    /// Returned for unexpected errors in the authentication system
    #[error("Error interno: {0}")]
    InternalError(String),
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => {
                DomainError::new(ErrorKind::AccessDenied, "Auth", "Token expirado")
            },
            AuthError::InvalidToken(msg) => {
                DomainError::new(ErrorKind::AccessDenied, "Auth", format!("Token inválido: {}", msg))
            },
            AuthError::InternalError(msg) => {
                DomainError::new(ErrorKind::InternalError, "Auth", msg)
            },
        }
    }
}

/**
 * Validates bearer tokens shared with the auth provider (HS256 secret).
 */
pub struct AuthService {
    /// Secret key used for signing JWT tokens
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Emite un token firmado con el mismo secreto (herramientas locales y tests)
    pub fn generate_access_token(&self, user_id: &str, email: &str, role: &str, expiry_secs: i64) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: now + expiry_secs,
            iat: now,
            jti: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes())
        ).map_err(|e| AuthError::InternalError(format!("Error al generar token: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Provider tokens carry an audience we do not pin
        validation.validate_aud = false;

        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation
        )
        .map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(format!("Error al validar token: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }
}
