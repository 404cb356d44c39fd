//! Repository layer
//!
//! One repository per table. Each holds a [`DbService`] handle and exposes
//! async CRUD methods. Multi-step workflows (order placement, cancellation,
//! default-flag switches) run inside a single write transaction.

mod address;
mod campaign;
mod category;
mod default_flag;
mod favorite;
mod login_history;
mod notification;
mod order;
mod payment_method;
mod product;
mod review;
mod user;

pub use address::AddressRepository;
pub use campaign::CampaignRepository;
pub use category::CategoryRepository;
pub use favorite::FavoriteRepository;
pub use login_history::LoginHistoryRepository;
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use payment_method::PaymentMethodRepository;
pub use product::ProductRepository;
pub use review::ReviewRepository;
pub use user::UserRepository;

pub(crate) use default_flag::clear_other_defaults;

use shared::{AppError, ErrorCode};

/// Repository error. Variants carry the [`ErrorCode`] that identifies the
/// failing resource so the API layer can surface precise codes.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(ErrorCode),
    #[error("{1}")]
    Conflict(ErrorCode, String),
    #[error("insufficient stock for '{1}'")]
    InsufficientStock(i64, String),
    #[error("{1}")]
    InvalidState(ErrorCode, String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(code) => AppError::new(code),
            RepoError::Conflict(code, msg) => AppError::with_message(code, msg),
            RepoError::InsufficientStock(product_id, product_name) => AppError::with_message(
                ErrorCode::InsufficientStock,
                format!("Insufficient stock for '{product_name}'"),
            )
            .with_detail("productId", product_id),
            RepoError::InvalidState(code, msg) => AppError::with_message(code, msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                AppError::database(e.to_string())
            }
        }
    }
}
