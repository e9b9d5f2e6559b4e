//! Primitive aliases shared by every layer.

/// Primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Optimistic-concurrency token stored alongside each record. Starts at 1
/// and is only ever advanced by the store.
pub type RowVersion = i32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
