pub mod anthropic;
pub mod report;
pub mod sheets;
