//! Shared types for the Bazaar backend
//!
//! Contains the plumbing that both the server and its tests depend on:
//!
//! - [`error`] - unified error codes, `AppError`, and the `ApiResponse` envelope
//! - [`util`] - timestamps, snowflake-style ids, order number generation

pub mod error;
pub mod util;

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
