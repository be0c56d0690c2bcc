pub mod calendar_event_service;
pub mod department_service;
pub mod leave_request_service;
pub mod role_service;
pub mod trash_service;
pub mod user_service;

#[cfg(test)]
pub mod test_support;

#[cfg(test)]
mod trash_service_test;

// Re-exportar para facilitar acceso
pub use calendar_event_service::CalendarEventService;
pub use department_service::DepartmentService;
pub use leave_request_service::LeaveRequestService;
pub use role_service::RoleService;
pub use trash_service::{EntityRepositories, TrashService};
pub use user_service::UserService;
