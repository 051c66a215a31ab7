pub mod connection_manager;
pub mod database_options;
