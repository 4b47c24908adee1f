//! Error types for record operations.

use thiserror::Error;

/// Errors that can occur when manipulating records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Positional access outside the record's arity.
    #[error("index {index} out of bounds for record of arity {arity}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The record's fixed arity.
        arity: usize,
    },
}
