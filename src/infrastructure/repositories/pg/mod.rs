pub mod calendar_event_pg_repository;
pub mod department_pg_repository;
pub mod leave_credit_pg_repository;
pub mod leave_request_pg_repository;
pub mod role_pg_repository;
pub mod trash_pg_repository;
pub mod user_pg_repository;

pub use calendar_event_pg_repository::CalendarEventPgRepository;
pub use department_pg_repository::DepartmentPgRepository;
pub use leave_credit_pg_repository::LeaveCreditPgRepository;
pub use leave_request_pg_repository::LeaveRequestPgRepository;
pub use role_pg_repository::RolePgRepository;
pub use trash_pg_repository::TrashPgRepository;
pub use user_pg_repository::UserPgRepository;

use crate::common::errors::{DomainError, ErrorKind};

/// Traduce un error de sqlx al error de dominio correspondiente
pub(crate) fn map_sqlx_error(entity_type: &'static str, err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::RowNotFound => {
            DomainError::new(ErrorKind::NotFound, entity_type, format!("{} no encontrado", entity_type))
        },
        sqlx::Error::Database(ref db_err) => {
            let message = db_err.message().to_string();
            let code = db_err.code().map(|code| code.to_string());
            match code.as_deref() {
                // Violación de unicidad
                Some("23505") => DomainError::new(ErrorKind::AlreadyExists, entity_type, message).with_source(err),
                // Violación de clave foránea
                Some("23503") => DomainError::new(ErrorKind::Conflict, entity_type, message).with_source(err),
                _ => DomainError::new(ErrorKind::InternalError, entity_type, format!("Error de base de datos: {}", message))
                    .with_source(err),
            }
        },
        _ => DomainError::new(ErrorKind::InternalError, entity_type, format!("Error de base de datos: {}", err))
            .with_source(err),
    }
}
