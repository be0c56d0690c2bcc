pub mod calendar_event_dto;
pub mod department_dto;
pub mod leave_request_dto;
pub mod role_dto;
pub mod trash_dto;
pub mod user_dto;
