//! Repository layer.
//!
//! [`MovieStore`] is the capability the API layer depends on. It has two
//! implementations: [`MovieRepo`] backed by PostgreSQL and
//! [`MockMovieRepo`] returning fixed responses for tests. The choice is made
//! when the application state is built.

use async_trait::async_trait;
use cinema_core::filters::{Filters, Metadata};
use cinema_core::types::DbId;

use crate::error::RepoError;
use crate::models::movie::{CreateMovie, Movie};

pub mod mock_movie_repo;
pub mod movie_repo;

pub use mock_movie_repo::MockMovieRepo;
pub use movie_repo::MovieRepo;

/// Entity name used in not-found and edit-conflict errors.
pub const MOVIE_ENTITY: &str = "Movie";

/// Storage operations on movies.
///
/// Implementations hold no mutable in-process state and are shared across
/// request tasks behind an `Arc`.
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Persist a new movie. The store assigns `id`, `created_at` and
    /// `version = 1`.
    async fn insert(&self, input: &CreateMovie) -> Result<Movie, RepoError>;

    /// Fetch one movie, or `CoreError::NotFound`.
    async fn get_by_id(&self, id: DbId) -> Result<Movie, RepoError>;

    /// Write `movie` if the stored version still equals `movie.version`.
    ///
    /// Returns the movie carrying its new version, or
    /// `CoreError::EditConflict` when no row matched.
    async fn update(&self, movie: &Movie) -> Result<Movie, RepoError>;

    /// One page of movies matching `title` and containing every genre in
    /// `genres`, with pagination metadata. Empty arguments match everything.
    async fn search(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), RepoError>;
}
