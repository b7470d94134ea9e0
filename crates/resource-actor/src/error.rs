/// Errors raised by the resource store itself, independent of the resource type.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Resource actor closed")]
    ActorClosed,
    #[error("Resource actor dropped the response channel")]
    ActorDropped,
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Wraps a plain message as an entity error. Used by mocks to simulate a
    /// rejected request.
    pub fn rejected(message: impl Into<String>) -> Self {
        let message: String = message.into();
        Self::EntityError(message.into())
    }
}
