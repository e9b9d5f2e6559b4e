//! Query-string parsing for list endpoints.
//!
//! Parameters arrive as raw strings so that a malformed integer becomes a
//! field error on the shared [`Validator`] rather than an extractor
//! rejection, letting every problem be reported in one response.

use cinema_core::filters::{Filters, DEFAULT_MOVIE_SORT, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use cinema_core::validator::Validator;
use serde::Deserialize;

/// Raw `?title=&genres=&page=&page_size=&sort=` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct MovieListParams {
    pub title: Option<String>,
    pub genres: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

/// Parsed movie search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieSearch {
    pub title: String,
    pub genres: Vec<String>,
    pub filters: Filters,
}

impl MovieListParams {
    /// Apply defaults and parse integers, recording parse failures on `v`.
    pub fn parse(self, v: &mut Validator) -> MovieSearch {
        let title = read_string(self.title, "");
        let genres = read_csv(self.genres);
        let page = read_int(self.page, "page", DEFAULT_PAGE, v);
        let page_size = read_int(self.page_size, "page_size", DEFAULT_PAGE_SIZE, v);
        let sort = read_string(self.sort, DEFAULT_MOVIE_SORT);

        MovieSearch {
            title,
            genres,
            filters: Filters::for_movies(page, page_size, sort),
        }
    }
}

/// The value, or `default` when absent or empty.
pub fn read_string(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    }
}

/// Split a comma-separated value; absent or empty yields no items.
pub fn read_csv(value: Option<String>) -> Vec<String> {
    match value.as_deref() {
        Some(csv) if !csv.is_empty() => csv.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Parse an integer, falling back to `default` when absent. A value that
/// does not parse records an error under `key` and also yields `default`.
pub fn read_int(value: Option<String>, key: &str, default: i64, v: &mut Validator) -> i64 {
    match value.as_deref() {
        None | Some("") => default,
        Some(s) => s.parse().unwrap_or_else(|_| {
            v.add_error(key, "must be an integer value");
            default
        }),
    }
}
