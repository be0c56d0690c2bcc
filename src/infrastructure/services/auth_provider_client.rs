use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::application::ports::auth_ports::AuthProviderPort;
use crate::common::config::AuthProviderConfig;
use crate::common::errors::{DomainError, Result};

/// Duración del bloqueo que equivale a una suspensión indefinida (100 años)
const SUSPENDED_BAN_DURATION: &str = "876000h";
const NO_BAN: &str = "none";

/**
 * Cliente de la API de administración del proveedor de autenticación.
 *
 * Las cuentas se identifican con el mismo id que la fila de `users`. Suspender
 * y reactivar modifican `ban_duration`; borrar elimina la cuenta.
 */
pub struct AuthProviderClient {
    http: Client,
    base_url: Url,
    service_key: String,
}

impl AuthProviderClient {
    pub fn new(config: &AuthProviderConfig, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        let parsed = Url::parse(base_url)
            .map_err(|e| DomainError::validation_error(
                "AuthProvider",
                format!("Invalid auth provider URL '{}': {}", base_url, e),
            ))?;
        if parsed.cannot_be_a_base() {
            return Err(DomainError::validation_error(
                "AuthProvider",
                format!("Auth provider URL '{}' cannot hold a path", base_url),
            ));
        }

        Ok(Self {
            http,
            base_url: parsed,
            service_key: config.service_key.clone(),
        })
    }

    /// `{base}/admin/users/{id}`, con el id codificado como un único segmento
    fn user_url(&self, user_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::internal_error("AuthProvider", "Auth provider URL cannot hold a path"))?
            .pop_if_empty()
            .extend(["admin", "users", user_id]);
        Ok(url)
    }

    async fn send(&self, method: Method, user_id: &str, body: Option<serde_json::Value>) -> Result<()> {
        let mut request = self.http
            .request(method.clone(), self.user_url(user_id)?)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!("{} {} -> {}", method, user_id, status);
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(Self::status_error(user_id, status, &detail))
    }

    fn status_error(user_id: &str, status: StatusCode, detail: &str) -> DomainError {
        let message = if detail.is_empty() {
            format!("Auth provider responded {}", status)
        } else {
            format!("Auth provider responded {}: {}", status, detail)
        };
        DomainError::internal_error("AuthProvider", message).with_id(user_id.to_string())
    }

    async fn set_ban(&self, user_id: &str, ban_duration: &str) -> Result<()> {
        self.send(Method::PUT, user_id, Some(json!({ "ban_duration": ban_duration }))).await
    }
}

#[async_trait]
impl AuthProviderPort for AuthProviderClient {
    #[instrument(skip(self))]
    async fn suspend_account(&self, user_id: &str) -> Result<()> {
        self.set_ban(user_id, SUSPENDED_BAN_DURATION).await?;
        info!("Cuenta suspendida en el proveedor de autenticación: {}", user_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reinstate_account(&self, user_id: &str) -> Result<()> {
        self.set_ban(user_id, NO_BAN).await?;
        info!("Cuenta reactivada en el proveedor de autenticación: {}", user_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_account(&self, user_id: &str) -> Result<()> {
        self.send(Method::DELETE, user_id, None).await?;
        info!("Cuenta eliminada del proveedor de autenticación: {}", user_id);
        Ok(())
    }
}

/// Proveedor vacío para despliegues sin API de administración configurada
pub struct NoopAuthProvider;

#[async_trait]
impl AuthProviderPort for NoopAuthProvider {
    async fn suspend_account(&self, user_id: &str) -> Result<()> {
        debug!("Sin proveedor de autenticación, no se suspende {}", user_id);
        Ok(())
    }

    async fn reinstate_account(&self, user_id: &str) -> Result<()> {
        debug!("Sin proveedor de autenticación, no se reactiva {}", user_id);
        Ok(())
    }

    async fn delete_account(&self, user_id: &str) -> Result<()> {
        debug!("Sin proveedor de autenticación, no se borra {}", user_id);
        Ok(())
    }
}
