use async_trait::async_trait;

use crate::common::errors::Result;
use crate::domain::entities::role::{NewRole, Role};

#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    async fn create_role(&self, role: NewRole) -> Result<Role>;

    async fn get_role(&self, id: i64) -> Result<Option<Role>>;

    async fn update_role(&self, role: &Role) -> Result<Role>;

    async fn list_roles(&self) -> Result<Vec<Role>>;
}
