//! Error types for MongoDB connector operations.

use sluice_record::RecordError;
use thiserror::Error;

/// Result type for MongoDB connector operations.
pub type MongoResult<T> = Result<T, MongoError>;

/// Errors that can occur in the MongoDB connector.
#[derive(Error, Debug)]
pub enum MongoError {
    /// MongoDB driver error.
    #[error("mongodb error: {0}")]
    Driver(#[from] mongodb::error::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Target collection does not exist.
    #[error("collection '{collection}' not found in database '{database}'")]
    CollectionNotFound {
        /// Database that was searched.
        database: String,
        /// Missing collection name.
        collection: String,
    },

    /// Column/arity mismatch during record <-> document translation.
    #[error("record conversion error: {0}")]
    RecordConversion(String),

    /// Positional record access error.
    #[error("record error: {0}")]
    Record(#[from] RecordError),
}

impl MongoError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a collection-not-found error.
    pub fn collection_not_found(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self::CollectionNotFound {
            database: database.into(),
            collection: collection.into(),
        }
    }

    /// Create a record conversion error.
    pub fn record_conversion(message: impl Into<String>) -> Self {
        Self::RecordConversion(message.into())
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is a collection-not-found error.
    pub fn is_collection_not_found(&self) -> bool {
        matches!(self, Self::CollectionNotFound { .. })
    }
}
