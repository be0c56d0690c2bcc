use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::errors::{DomainError, Result};

/// Empleado registrado en el panel.
///
/// El `id` coincide con el identificador de la cuenta en el proveedor de
/// autenticación, de modo que ambas filas se pueden relacionar sin tabla puente.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub department_id: Option<i64>,
    pub role_id: Option<i64>,
    pub hired_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub department_id: Option<i64>,
    pub role_id: Option<i64>,
    pub hired_on: Option<NaiveDate>,
}

impl NewUser {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Option<String>,
        email: String,
        first_name: String,
        last_name: String,
        position: Option<String>,
        department_id: Option<i64>,
        role_id: Option<i64>,
        hired_on: Option<NaiveDate>,
    ) -> Result<Self> {
        validate_email(&email)?;
        validate_name("first_name", &first_name)?;
        validate_name("last_name", &last_name)?;

        let id = match id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                validate_user_id(id)?;
                id.to_string()
            },
            _ => Uuid::new_v4().to_string(),
        };

        Ok(Self {
            id,
            email: email.trim().to_lowercase(),
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            position,
            department_id,
            role_id,
            hired_on,
        })
    }
}

/// Ids de hasta 36 caracteres formados por letras, dígitos, `-` y `_`
pub fn validate_user_id(id: &str) -> Result<()> {
    if id.len() > 36 {
        return Err(DomainError::validation_error("User", "User id must be at most 36 characters"));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
        return Err(DomainError::validation_error("User", format!("Invalid user id: '{}'", id)));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if !email.contains('@') || email.len() < 5 {
        return Err(DomainError::validation_error("User", format!("Invalid email: '{}'", email)));
    }
    Ok(())
}

pub fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation_error("User", format!("{} is required", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_generates_id_and_normalizes_email() {
        let user = NewUser::new(
            None,
            " Ana.Lopez@Example.com ".to_string(),
            "Ana".to_string(),
            "López".to_string(),
            None,
            Some(1),
            None,
            None,
        ).unwrap();

        assert_eq!(user.email, "ana.lopez@example.com");
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn test_new_user_rejects_invalid_email() {
        let result = NewUser::new(None, "nope".into(), "A".into(), "B".into(), None, None, None, None);
        assert!(result.is_err());
    }

    fn with_id(id: &str) -> Result<NewUser> {
        NewUser::new(Some(id.to_string()), "ana@example.com".into(), "Ana".into(), "López".into(), None, None, None, None)
    }

    #[test]
    fn test_new_user_trims_and_checks_id() {
        assert_eq!(with_id(" 2f1c-ab_9 ").unwrap().id, "2f1c-ab_9");

        let err = with_id("../../settings").unwrap_err();
        assert_eq!(err.kind, crate::common::errors::ErrorKind::InvalidInput);
        assert!(with_id("a/b").is_err());
        assert!(with_id(&"x".repeat(37)).is_err());
    }
}
