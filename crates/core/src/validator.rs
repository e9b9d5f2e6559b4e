//! Field-keyed validation accumulator.
//!
//! A [`Validator`] is built fresh for each validation pass, fed a series of
//! checks, and then inspected or converted into a [`CoreError`]. Only the
//! first failure recorded for a field is kept; later failures on the same
//! field are dropped so every field maps to exactly one message.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use crate::error::CoreError;

/// Field name -> error message. Ordered so serialized output is stable.
pub type FieldErrors = BTreeMap<String, String>;

/// Accumulates validation failures for a single pass.
#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` under `field` unless the field already has an error.
    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record `message` under `field` when `ok` is false.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.add_error(field, message);
        }
    }

    /// True when no failure has been recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Consume the validator, yielding `CoreError::InvalidFields` if any
    /// check failed.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self.errors))
        }
    }
}

/// True when `values` contains no duplicate elements.
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}

/// True when `value` appears in `list`.
pub fn permitted_value<T: PartialEq + ?Sized>(value: &T, list: &[&T]) -> bool {
    list.iter().any(|candidate| *candidate == value)
}
