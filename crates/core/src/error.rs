use crate::types::DbId;
use crate::validator::FieldErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One message per offending field, collected in a single validation pass.
    #[error("Validation failed on {} field(s)", .0.len())]
    InvalidFields(FieldErrors),

    /// A version-gated update matched no row.
    #[error("Edit conflict: {entity} with id {id} was modified concurrently")]
    EditConflict { entity: &'static str, id: DbId },

    #[error("Internal error: {0}")]
    Internal(String),
}
