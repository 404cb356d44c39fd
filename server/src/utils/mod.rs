//! Cross-cutting helpers

pub mod logger;
pub mod validation;
