//! Error types for the wa-directory library.
//!
//! This module provides custom error types using `thiserror` for better error
//! handling and more specific error messages throughout the application.

use thiserror::Error;

/// Errors that can occur in the wa-directory library.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Connection pool errors
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Contact not found
    #[error("Contact not found: {0}")]
    ContactNotFound(String),

    /// Group not found
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// A topic with the same keyword is already tracked
    #[error("Topic '{0}' already exists")]
    DuplicateTopic(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input from the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

/// Convenience type alias for Result with DirectoryError
pub type Result<T> = std::result::Result<T, DirectoryError>;

impl From<anyhow::Error> for DirectoryError {
    fn from(err: anyhow::Error) -> Self {
        DirectoryError::Other(err.to_string())
    }
}
