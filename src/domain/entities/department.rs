use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::errors::{DomainError, Result};

/// Departamento de la organización
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Datos para crear un departamento (el id lo asigna la base de datos)
#[derive(Debug, Clone)]
pub struct NewDepartment {
    pub name: String,
    pub description: Option<String>,
}

impl NewDepartment {
    pub fn new(name: String, description: Option<String>) -> Result<Self> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation_error("Department", "Department name is required"));
        }

        Ok(Self {
            name,
            description: description.filter(|d| !d.trim().is_empty()),
        })
    }
}

impl Department {
    pub fn rename(&mut self, name: String) -> Result<()> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation_error("Department", "Department name is required"));
        }
        self.name = name;
        Ok(())
    }
}
