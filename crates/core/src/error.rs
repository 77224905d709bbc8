use crate::types::DocId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DocId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The stored document changed between load and write.
    #[error("Concurrent modification: {entity} with id {id} was changed by another request")]
    ConcurrentModification { entity: &'static str, id: DocId },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether repeating the whole read-modify-write cycle may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::ConcurrentModification { .. })
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
