use async_trait::async_trait;

use crate::common::errors::Result;
use crate::domain::entities::user::{NewUser, User};

/// Acceso a usuarios activos (las filas marcadas como eliminadas no se devuelven)
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Crea un nuevo usuario
    async fn create_user(&self, user: NewUser) -> Result<User>;

    /// Obtiene un usuario por ID
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Actualiza un usuario existente
    async fn update_user(&self, user: &User) -> Result<User>;

    /// Lista usuarios con paginación
    async fn list_users(&self, limit: i64, offset: i64) -> Result<Vec<User>>;

    async fn count_users_in_department(&self, department_id: i64) -> Result<i64>;

    async fn count_users_with_role(&self, role_id: i64) -> Result<i64>;
}
