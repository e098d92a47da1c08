/// Collects per-field outcomes so a caller can report every bad field of a
/// request at once instead of stopping at the first.

use crate::error::{ErrorKind, Result};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct FieldReport {
    errors: Vec<FieldError>,
}

impl FieldReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the value out of `result`, recording the error under `field` on failure.
    pub fn check<T>(&mut self, field: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(FieldError {
                    field: field.to_string(),
                    kind: e.kind(),
                    message: e.to_string(),
                });
                None
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn finish(self) -> std::result::Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
