//! Authentication
//!
//! JWT issuance and validation, Argon2 password hashing, the
//! [`CurrentUser`] extractor and the route-guard middleware.

mod extractor;
mod jwt;
mod middleware;
mod password;

pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtConfig, JwtService};
pub use middleware::require_auth;
pub use password::{hash_password, verify_password};
