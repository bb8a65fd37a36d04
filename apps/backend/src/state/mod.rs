pub mod app_state;
pub mod security_config;
