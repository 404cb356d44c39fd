//! HTTP API modules, one per resource

pub mod addresses;
pub mod auth;
pub mod campaigns;
pub mod categories;
pub mod favorites;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod reviews;
pub mod security;
