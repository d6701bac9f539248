pub mod anthropic_config;
pub mod app_config;
pub mod report_config;
pub mod sheets_config;
