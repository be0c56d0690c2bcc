pub mod calendar_event;
pub mod department;
pub mod leave_credit;
pub mod leave_request;
pub mod role;
pub mod trashed_item;
pub mod user;
