// Repositorios PostgreSQL
pub mod pg;

pub use pg::{
    CalendarEventPgRepository, DepartmentPgRepository, LeaveCreditPgRepository, LeaveRequestPgRepository,
    RolePgRepository, TrashPgRepository, UserPgRepository,
};
