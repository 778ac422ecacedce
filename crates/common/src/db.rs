//! Shared database types for Chatbridge
//!
//! Error type for document-store repositories. Handlers log these and never
//! surface them to the client.

use thiserror::Error;

/// Repository-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}
