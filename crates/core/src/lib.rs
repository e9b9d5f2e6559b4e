//! Domain logic for the movie catalog.
//!
//! Everything here is pure: no database, no HTTP. The `db` and `api` crates
//! build on these types.

pub mod error;
pub mod filters;
pub mod runtime;
pub mod types;
pub mod validator;
