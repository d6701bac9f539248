use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutineError {
    #[error("Routine failed: {0}")]
    RoutineFailure(String),
}

impl RoutineError {
    pub fn routine_failure(message: impl Into<String>) -> Self {
        RoutineError::RoutineFailure(message.into())
    }
}

#[async_trait::async_trait]
pub trait Routine {
    fn name(&self) -> &str;

    async fn run(&self) -> error_stack::Result<(), RoutineError>;
}
