//! Errors raised by [`IndifferentMap`](crate::IndifferentMap) operations.

use thiserror::Error;

use crate::value::Value;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndifferentError {
    /// `fetch` without a fallback found no entry for the normalized key.
    #[error("key not found: {key}")]
    KeyNotFound { key: Value },
    /// A bulk operation was handed something other than a mapping.
    #[error("{operation}: expected a mapping, found {found}")]
    TypeMismatch {
        operation: &'static str,
        found: &'static str,
    },
}
