pub mod calendar_event_repository;
pub mod department_repository;
pub mod leave_credit_repository;
pub mod leave_request_repository;
pub mod role_repository;
pub mod trash_repository;
pub mod user_repository;
