pub mod calendar_event_handler;
pub mod department_handler;
pub mod leave_request_handler;
pub mod role_handler;
pub mod trash_handler;
pub mod user_handler;
