pub mod mapping_routine;
pub mod objective_repository;
pub mod prompt;
