use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TaxonomyError {
    #[error("{0} name must not be empty")]
    MissingName(&'static str),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TaxonomyError {
    fn from(msg: String) -> Self {
        TaxonomyError::ActorCommunicationError(msg)
    }
}
