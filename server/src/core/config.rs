use crate::auth::JwtConfig;

/// Server configuration
///
/// Every field can be overridden from the environment:
///
/// | Environment variable | Default | Notes |
/// |----------------------|---------|-------|
/// | HTTP_HOST | 0.0.0.0 | Bind address |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | bazaar.db | SQLite file path |
/// | JWT_SECRET | dev-secret-change-me | HS256 signing key |
/// | JWT_EXPIRY_HOURS | 24 | Token lifetime |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub http_port: u16,
    pub database_path: String,
    pub jwt: JwtConfig,
    pub environment: String,
    pub request_timeout_ms: u64,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").unwrap_or_else(|_| "bazaar.db".into()),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
