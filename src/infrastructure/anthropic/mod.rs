pub mod client;
pub mod schema;
