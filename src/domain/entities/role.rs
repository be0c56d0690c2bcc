use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::errors::{DomainError, Result};

/// Rol administrativo asignable a usuarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

impl NewRole {
    pub fn new(name: String, description: Option<String>, permissions: Vec<String>) -> Result<Self> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation_error("Role", "Role name is required"));
        }

        Ok(Self {
            name,
            description,
            permissions: normalize_permissions(permissions),
        })
    }
}

/// Elimina duplicados y entradas vacías conservando el orden
pub fn normalize_permissions(permissions: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(permissions.len());
    for permission in permissions {
        let permission = permission.trim().to_string();
        if !permission.is_empty() && !normalized.contains(&permission) {
            normalized.push(permission);
        }
    }
    normalized
}
