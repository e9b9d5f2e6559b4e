//! Fixed-response [`MovieStore`] for tests that do not need a database.

use async_trait::async_trait;
use cinema_core::error::CoreError;
use cinema_core::filters::{calculate_metadata, Filters, Metadata};
use cinema_core::types::DbId;

use super::{MovieStore, MOVIE_ENTITY};
use crate::error::RepoError;
use crate::models::movie::{CreateMovie, Movie};

/// Answers every call from an optional canned movie.
///
/// - `insert` validates and echoes the input back as movie 1, version 1.
/// - `get_by_id` returns the canned movie when the id matches.
/// - `update` succeeds only when id and version match the canned movie.
/// - `search` returns the canned movie on a single page.
///
/// Nothing is remembered between calls.
#[derive(Debug, Clone, Default)]
pub struct MockMovieRepo {
    movie: Option<Movie>,
}

impl MockMovieRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(movie: Movie) -> Self {
        Self { movie: Some(movie) }
    }

    fn canned(&self, id: DbId) -> Option<&Movie> {
        self.movie.as_ref().filter(|m| m.id == id)
    }
}

#[async_trait]
impl MovieStore for MockMovieRepo {
    async fn insert(&self, input: &CreateMovie) -> Result<Movie, RepoError> {
        input.validate()?;
        Ok(Movie {
            id: 1,
            created_at: chrono::Utc::now(),
            title: input.title.clone(),
            year: input.year,
            runtime: input.runtime,
            genres: input.genres.clone(),
            version: 1,
        })
    }

    async fn get_by_id(&self, id: DbId) -> Result<Movie, RepoError> {
        self.canned(id).cloned().ok_or_else(|| {
            CoreError::NotFound {
                entity: MOVIE_ENTITY,
                id,
            }
            .into()
        })
    }

    async fn update(&self, movie: &Movie) -> Result<Movie, RepoError> {
        movie.validate()?;
        match self.canned(movie.id) {
            Some(current) if current.version == movie.version => Ok(Movie {
                version: movie.version + 1,
                ..movie.clone()
            }),
            _ => Err(CoreError::EditConflict {
                entity: MOVIE_ENTITY,
                id: movie.id,
            }
            .into()),
        }
    }

    async fn search(
        &self,
        _title: &str,
        _genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), RepoError> {
        let movies: Vec<Movie> = self.movie.iter().cloned().collect();
        let metadata = calculate_metadata(movies.len() as i64, filters.page, filters.page_size);
        Ok((movies, metadata))
    }
}
