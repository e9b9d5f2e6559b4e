//! Pagination and sorting for list queries.
//!
//! [`Filters`] turns untrusted `page` / `page_size` / `sort` parameters into
//! a bounded query shape. The sort key is only ever resolved against a fixed
//! safelist, and the column name handed to SQL is taken from the safelist
//! itself, never from the request.

use serde::Serialize;

use crate::validator::{permitted_value, Validator};

// ---------------------------------------------------------------------------
// Defaults and bounds
// ---------------------------------------------------------------------------

/// Page used when the request does not specify one.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the request does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Highest page number accepted.
pub const MAX_PAGE: i64 = 10_000_000;

/// Largest page size accepted.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Sort keys accepted for movie listings. A leading `-` means descending.
pub const MOVIE_SORT_SAFELIST: &[&str] = &[
    "id", "title", "year", "runtime", "-id", "-title", "-year", "-runtime",
];

/// Sort key used when the request does not specify one.
pub const DEFAULT_MOVIE_SORT: &str = "id";

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Sort direction as emitted into `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Pagination and sort parameters for one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub page: i64,
    pub page_size: i64,
    pub sort: String,
    pub sort_safelist: &'static [&'static str],
}

impl Filters {
    /// Filters for movie listings with the given sort key.
    pub fn for_movies(page: i64, page_size: i64, sort: impl Into<String>) -> Self {
        Self {
            page,
            page_size,
            sort: sort.into(),
            sort_safelist: MOVIE_SORT_SAFELIST,
        }
    }

    /// Column to order by, with any leading `-` removed.
    ///
    /// # Panics
    ///
    /// Panics if `sort` is not in the safelist. [`validate_filters`] rejects
    /// such values, so reaching this with one is a programming error.
    pub fn sort_column(&self) -> &'static str {
        match self.safelisted_sort() {
            Some(safe) => safe.trim_start_matches('-'),
            None => panic!("unsafe sort parameter: {:?}", self.sort),
        }
    }

    pub fn sort_direction(&self) -> SortDirection {
        if self.sort.starts_with('-') {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    /// The safelist entry equal to the requested sort key, if any.
    fn safelisted_sort(&self) -> Option<&'static str> {
        self.sort_safelist
            .iter()
            .copied()
            .find(|safe| *safe == self.sort)
    }
}

/// Record every problem with `filters` on `v`.
pub fn validate_filters(v: &mut Validator, filters: &Filters) {
    v.check(filters.page > 0, "page", "must be greater than zero");
    v.check(filters.page <= MAX_PAGE, "page", "must be a maximum of 10 million");
    v.check(filters.page_size > 0, "page_size", "must be greater than zero");
    v.check(
        filters.page_size <= MAX_PAGE_SIZE,
        "page_size",
        "must be a maximum of 100",
    );
    v.check(
        permitted_value(filters.sort.as_str(), filters.sort_safelist),
        "sort",
        "invalid sort value",
    );
}

// ---------------------------------------------------------------------------
// Pagination metadata
// ---------------------------------------------------------------------------

/// Where a result page sits within the full result set.
///
/// All fields are zero when the result set is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

/// Derive page statistics from a total match count.
pub fn calculate_metadata(total_records: i64, page: i64, page_size: i64) -> Metadata {
    if total_records == 0 {
        return Metadata::default();
    }

    Metadata {
        current_page: page,
        page_size,
        first_page: 1,
        last_page: (total_records + page_size - 1) / page_size,
        total_records,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
