pub mod auth_ports;
pub mod trash_ports;
