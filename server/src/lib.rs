//! E-commerce backend server
//!
//! REST API over SQLite: catalog, orders with stock reconciliation,
//! account resources (addresses, payment methods, reviews, notifications,
//! favorites) and JWT authentication.

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod pricing;
pub mod routes;
pub mod utils;

pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};
