//! Movie entity model, DTOs and record validation.

use cinema_core::error::CoreError;
use cinema_core::runtime::Runtime;
use cinema_core::types::{DbId, RowVersion, Timestamp};
use cinema_core::validator::{unique, Validator};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Earliest release year accepted.
pub const MIN_YEAR: i32 = 1990;

/// Shortest runtime accepted, in minutes.
pub const MIN_RUNTIME_MINUTES: i32 = 20;

/// A row from the `movies` table.
///
/// `created_at` stays internal and is not serialized.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    #[serde(skip)]
    pub created_at: Timestamp,
    pub title: String,
    pub year: i32,
    #[sqlx(try_from = "i32")]
    pub runtime: Runtime,
    pub genres: Vec<String>,
    pub version: RowVersion,
}

/// DTO for creating a new movie.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMovie {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub runtime: Runtime,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// DTO for patching a movie. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub runtime: Option<Runtime>,
    pub genres: Option<Vec<String>>,
}

/// Record every rule the movie fields break on `v`.
///
/// Rules for a field are checked in order; only the first failure per field
/// is kept by the validator.
pub fn check_movie(v: &mut Validator, title: &str, year: i32, runtime: Runtime, genres: &[String]) {
    v.check(!title.is_empty(), "title", "must be provided");

    v.check(year != 0, "year", "must be provided");
    v.check(
        year >= MIN_YEAR,
        "year",
        "must be greater than or equal to 1990",
    );

    v.check(runtime.minutes() != 0, "runtime", "must be provided");
    v.check(runtime.minutes() > 0, "runtime", "must be a positive integer");
    v.check(
        runtime.minutes() >= MIN_RUNTIME_MINUTES,
        "runtime",
        "must be at least 20 minutes",
    );

    v.check(!genres.is_empty(), "genres", "must contain at least 1 genre");
    v.check(unique(genres), "genres", "must not contain duplicate values");
}

impl CreateMovie {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut v = Validator::new();
        check_movie(&mut v, &self.title, self.year, self.runtime, &self.genres);
        v.into_result()
    }
}

impl Movie {
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut v = Validator::new();
        check_movie(&mut v, &self.title, self.year, self.runtime, &self.genres);
        v.into_result()
    }

    /// Apply the fields present in `patch`, leaving id and version untouched.
    pub fn apply(&mut self, patch: UpdateMovie) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(runtime) = patch.runtime {
            self.runtime = runtime;
        }
        if let Some(genres) = patch.genres {
            self.genres = genres;
        }
    }
}
