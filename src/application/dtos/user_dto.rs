use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateUserDto {
    /// Id de la cuenta en el proveedor de autenticación; se genera si falta
    pub id: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub department_id: Option<i64>,
    pub role_id: Option<i64>,
    pub hired_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateUserDto {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub department_id: Option<i64>,
    pub role_id: Option<i64>,
    pub hired_on: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListUsersQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
