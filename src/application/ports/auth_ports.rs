use async_trait::async_trait;

use crate::common::errors::DomainError;

/// Puerto hacia el proveedor externo de autenticación (cuentas de acceso)
#[async_trait]
pub trait AuthProviderPort: Send + Sync + 'static {
    /// Impide el acceso sin borrar la cuenta
    async fn suspend_account(&self, user_id: &str) -> Result<(), DomainError>;

    /// Revierte `suspend_account`
    async fn reinstate_account(&self, user_id: &str) -> Result<(), DomainError>;

    /// Borra la cuenta definitivamente
    async fn delete_account(&self, user_id: &str) -> Result<(), DomainError>;
}
