//! Shared utilities, configuration, and error handling for Chatbridge
//!
//! This crate provides common functionality used across the Chatbridge service:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Validating request extractors

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;

pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::ValidatedForm;
