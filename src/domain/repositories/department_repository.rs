use async_trait::async_trait;

use crate::common::errors::Result;
use crate::domain::entities::department::{Department, NewDepartment};

#[async_trait]
pub trait DepartmentRepository: Send + Sync + 'static {
    async fn create_department(&self, department: NewDepartment) -> Result<Department>;

    async fn get_department(&self, id: i64) -> Result<Option<Department>>;

    async fn update_department(&self, department: &Department) -> Result<Department>;

    async fn list_departments(&self) -> Result<Vec<Department>>;
}
