use std::time::Duration;

use cinema_core::error::CoreError;

/// Error returned by movie store operations.
///
/// Not-found, edit-conflict and validation failures travel as [`CoreError`]
/// so callers can tell them apart from storage faults.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The operation did not complete within the query deadline.
    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepoError::Core(CoreError::NotFound { .. }))
    }

    pub fn is_edit_conflict(&self) -> bool {
        matches!(self, RepoError::Core(CoreError::EditConflict { .. }))
    }
}
