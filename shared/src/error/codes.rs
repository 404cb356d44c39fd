//! Unified error codes for the Bazaar backend
//!
//! Error codes are shared between the server and any API client and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment method errors
//! - 6xxx: Product / catalog errors
//! - 7xxx: Review errors
//! - 8xxx: Account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Value out of range
    ValueOutOfRange = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order contains no line items
    EmptyOrder = 4002,
    /// Order cannot be cancelled in its current status
    OrderNotCancellable = 4003,
    /// Order has already been cancelled
    OrderAlreadyCancelled = 4004,
    /// Order status value is not recognized
    InvalidOrderStatus = 4005,

    // ==================== 5xxx: Payment method ====================
    /// Payment method not found
    PaymentMethodNotFound = 5001,
    /// Card already registered for this user
    DuplicateCard = 5002,
    /// Card details are invalid (number, expiry)
    InvalidCard = 5003,

    // ==================== 6xxx: Product / catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Requested quantity exceeds available stock
    InsufficientStock = 6002,
    /// Product name already exists
    ProductNameExists = 6003,
    /// Category not found
    CategoryNotFound = 6004,
    /// Category name already exists
    CategoryNameExists = 6005,
    /// Campaign not found
    CampaignNotFound = 6006,
    /// Product already in favorites
    AlreadyFavorite = 6007,
    /// Favorite not found
    FavoriteNotFound = 6008,

    // ==================== 7xxx: Review ====================
    /// Review not found
    ReviewNotFound = 7001,
    /// User has already reviewed this product
    DuplicateReview = 7002,
    /// Rating must be between 1 and 5
    InvalidRating = 7003,

    // ==================== 8xxx: Account ====================
    /// User not found
    UserNotFound = 8001,
    /// Email is already registered
    EmailExists = 8002,
    /// Current password does not match
    PasswordMismatch = 8003,
    /// Address not found
    AddressNotFound = 8004,
    /// Notification not found
    NotificationNotFound = 8005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Not authenticated",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token has expired",
            Self::TokenInvalid => "Token is invalid",
            Self::AccountDisabled => "Account is disabled",

            Self::PermissionDenied => "Permission denied",

            Self::OrderNotFound => "Order not found",
            Self::EmptyOrder => "Order must contain at least one item",
            Self::OrderNotCancellable => "Cannot cancel shipped or delivered orders",
            Self::OrderAlreadyCancelled => "Order has already been cancelled",
            Self::InvalidOrderStatus => "Unrecognized order status",

            Self::PaymentMethodNotFound => "Payment method not found",
            Self::DuplicateCard => "Card is already registered",
            Self::InvalidCard => "Invalid card details",

            Self::ProductNotFound => "Product not found",
            Self::InsufficientStock => "Insufficient stock",
            Self::ProductNameExists => "Product name already exists",
            Self::CategoryNotFound => "Category not found",
            Self::CategoryNameExists => "Category name already exists",
            Self::CampaignNotFound => "Campaign not found",
            Self::AlreadyFavorite => "Product is already in favorites",
            Self::FavoriteNotFound => "Favorite not found",

            Self::ReviewNotFound => "Review not found",
            Self::DuplicateReview => "User has already reviewed this product",
            Self::InvalidRating => "Rating must be between 1 and 5",

            Self::UserNotFound => "User not found",
            Self::EmailExists => "Email is already registered",
            Self::PasswordMismatch => "Current password does not match",
            Self::AddressNotFound => "Address not found",
            Self::NotificationNotFound => "Notification not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }

    /// Get the category of this error code
    pub fn category(&self) -> super::category::ErrorCategory {
        super::category::ErrorCategory::from_code(self.code())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when a u16 value does not map to a known error code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::RequiredField,
            7 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::AccountDisabled,

            2001 => Self::PermissionDenied,

            4001 => Self::OrderNotFound,
            4002 => Self::EmptyOrder,
            4003 => Self::OrderNotCancellable,
            4004 => Self::OrderAlreadyCancelled,
            4005 => Self::InvalidOrderStatus,

            5001 => Self::PaymentMethodNotFound,
            5002 => Self::DuplicateCard,
            5003 => Self::InvalidCard,

            6001 => Self::ProductNotFound,
            6002 => Self::InsufficientStock,
            6003 => Self::ProductNameExists,
            6004 => Self::CategoryNotFound,
            6005 => Self::CategoryNameExists,
            6006 => Self::CampaignNotFound,
            6007 => Self::AlreadyFavorite,
            6008 => Self::FavoriteNotFound,

            7001 => Self::ReviewNotFound,
            7002 => Self::DuplicateReview,
            7003 => Self::InvalidRating,

            8001 => Self::UserNotFound,
            8002 => Self::EmailExists,
            8003 => Self::PasswordMismatch,
            8004 => Self::AddressNotFound,
            8005 => Self::NotificationNotFound,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_u16() {
        for code in [
            ErrorCode::Success,
            ErrorCode::InsufficientStock,
            ErrorCode::OrderAlreadyCancelled,
            ErrorCode::DuplicateReview,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(ErrorCode::try_from(3999), Err(InvalidErrorCode(3999)));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::ProductNotFound.to_string(), "E6001");
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
    }
}
