pub mod mapping;
pub mod objective;
pub mod routine;
pub mod sheets;
