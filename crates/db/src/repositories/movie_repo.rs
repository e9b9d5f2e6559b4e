//! Repository for the `movies` table.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use cinema_core::error::CoreError;
use cinema_core::filters::{calculate_metadata, Filters, Metadata};
use cinema_core::types::DbId;
use sqlx::{FromRow, PgPool};

use super::{MovieStore, MOVIE_ENTITY};
use crate::error::RepoError;
use crate::models::movie::{CreateMovie, Movie};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, created_at, title, year, runtime, genres, version";

/// Deadline applied to every statement when none is configured.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// A search result row: the movie plus the window count of all matches.
#[derive(Debug, FromRow)]
struct MovieSearchRow {
    total_records: i64,
    #[sqlx(flatten)]
    movie: Movie,
}

/// PostgreSQL-backed [`MovieStore`].
///
/// Holds only the pool handle and the per-statement deadline, so it is
/// cheap to clone and safe to share between tasks. Concurrent writers are
/// coordinated solely through the `version` column.
#[derive(Debug, Clone)]
pub struct MovieRepo {
    pool: PgPool,
    query_timeout: Duration,
}

impl MovieRepo {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub fn with_default_timeout(pool: PgPool) -> Self {
        Self::new(pool, DEFAULT_QUERY_TIMEOUT)
    }

    /// Run `fut` under the query deadline. On expiry the future is dropped,
    /// which cancels the in-flight statement on the client side.
    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> Result<T, RepoError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, fut).await {
            Ok(result) => result.map_err(RepoError::from),
            Err(_) => {
                tracing::warn!(
                    operation,
                    timeout_ms = self.query_timeout.as_millis() as u64,
                    "Movie store operation timed out"
                );
                Err(RepoError::Timeout(self.query_timeout))
            }
        }
    }
}

#[async_trait]
impl MovieStore for MovieRepo {
    async fn insert(&self, input: &CreateMovie) -> Result<Movie, RepoError> {
        input.validate()?;

        let query = format!(
            "INSERT INTO movies (title, year, runtime, genres)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let movie = self
            .bounded(
                "insert",
                sqlx::query_as::<_, Movie>(&query)
                    .bind(&input.title)
                    .bind(input.year)
                    .bind(input.runtime.minutes())
                    .bind(&input.genres)
                    .fetch_one(&self.pool),
            )
            .await?;

        tracing::debug!(movie_id = movie.id, version = movie.version, "Movie inserted");
        Ok(movie)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Movie, RepoError> {
        if id < 1 {
            return Err(CoreError::Validation("invalid id parameter".to_string()).into());
        }

        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        self.bounded(
            "get_by_id",
            sqlx::query_as::<_, Movie>(&query)
                .bind(id)
                .fetch_optional(&self.pool),
        )
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: MOVIE_ENTITY,
                id,
            }
            .into()
        })
    }

    async fn update(&self, movie: &Movie) -> Result<Movie, RepoError> {
        movie.validate()?;

        let query = format!(
            "UPDATE movies SET
                title = $1,
                year = $2,
                runtime = $3,
                genres = $4,
                version = version + 1
             WHERE id = $5 AND version = $6
             RETURNING {COLUMNS}"
        );
        let updated = self
            .bounded(
                "update",
                sqlx::query_as::<_, Movie>(&query)
                    .bind(&movie.title)
                    .bind(movie.year)
                    .bind(movie.runtime.minutes())
                    .bind(&movie.genres)
                    .bind(movie.id)
                    .bind(movie.version)
                    .fetch_optional(&self.pool),
            )
            .await?;

        match updated {
            Some(updated) => {
                tracing::debug!(movie_id = updated.id, version = updated.version, "Movie updated");
                Ok(updated)
            }
            None => {
                tracing::warn!(
                    movie_id = movie.id,
                    version = movie.version,
                    "Movie update matched no row"
                );
                Err(CoreError::EditConflict {
                    entity: MOVIE_ENTITY,
                    id: movie.id,
                }
                .into())
            }
        }
    }

    async fn search(
        &self,
        title: &str,
        genres: &[String],
        filters: &Filters,
    ) -> Result<(Vec<Movie>, Metadata), RepoError> {
        // Identifier and keyword come from the safelist, never from the request.
        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS}
             FROM movies
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '')
               AND (genres @> $2 OR $2 = '{{}}')
             ORDER BY {column} {direction}, id ASC
             LIMIT $3 OFFSET $4",
            column = filters.sort_column(),
            direction = filters.sort_direction().as_sql(),
        );
        let rows = self
            .bounded(
                "search",
                sqlx::query_as::<_, MovieSearchRow>(&query)
                    .bind(title)
                    .bind(genres)
                    .bind(filters.limit())
                    .bind(filters.offset())
                    .fetch_all(&self.pool),
            )
            .await?;

        let total_records = rows.first().map_or(0, |row| row.total_records);
        let metadata = calculate_metadata(total_records, filters.page, filters.page_size);
        let movies: Vec<Movie> = rows.into_iter().map(|row| row.movie).collect();

        tracing::debug!(
            returned = movies.len(),
            total_records,
            page = filters.page,
            "Movie search completed"
        );
        Ok((movies, metadata))
    }
}
