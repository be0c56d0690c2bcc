pub mod dtos;
pub mod ports;
pub mod services;

pub use ports::trash_ports::TrashUseCase;
pub use ports::auth_ports::AuthProviderPort;
