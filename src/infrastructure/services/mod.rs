pub mod auth_provider_client;
pub mod trash_cleanup_service;
