//! Stored payment method model
//!
//! Full card numbers and CVVs are never persisted. Card rows keep only the
//! last four digits for display and a SHA-256 fingerprint for duplicate
//! detection.

use serde::{Deserialize, Serialize};

/// Stored payment method. At most one per user carries `is_default = true`.
/// Card fields are populated for `method_type = "CreditCard" | "DebitCard"`,
/// bank fields for `method_type = "BankTransfer"`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentMethod {
    pub id: i64,
    pub user_id: i64,
    pub method_type: String,
    pub card_holder_name: Option<String>,
    pub card_last4: Option<String>,
    pub card_fingerprint: Option<String>,
    pub expiry_month: Option<i64>,
    pub expiry_year: Option<i64>,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub is_default: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Add payment method payload. `card_number` is consumed during creation and
/// never stored as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodCreate {
    #[serde(default = "default_method_type")]
    pub method_type: String,
    pub card_holder_name: Option<String>,
    pub card_number: Option<String>,
    pub expiry_month: Option<i64>,
    pub expiry_year: Option<i64>,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

fn default_method_type() -> String {
    "CreditCard".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodUpdate {
    pub card_holder_name: Option<String>,
    pub expiry_month: Option<i64>,
    pub expiry_year: Option<i64>,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub is_default: Option<bool>,
}

/// Masked payment method as exposed to API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodView {
    pub id: i64,
    pub method_type: String,
    pub card_holder_name: Option<String>,
    pub masked_card_number: Option<String>,
    pub expiry_month: Option<i64>,
    pub expiry_year: Option<i64>,
    pub bank_name: Option<String>,
    pub account_holder_name: Option<String>,
    pub is_default: bool,
    pub created_at: i64,
}

impl From<PaymentMethod> for PaymentMethodView {
    fn from(pm: PaymentMethod) -> Self {
        Self {
            id: pm.id,
            method_type: pm.method_type,
            card_holder_name: pm.card_holder_name,
            masked_card_number: pm
                .card_last4
                .map(|last4| format!("**** **** **** {last4}")),
            expiry_month: pm.expiry_month,
            expiry_year: pm.expiry_year,
            bank_name: pm.bank_name,
            account_holder_name: pm.account_holder_name,
            is_default: pm.is_default,
            created_at: pm.created_at,
        }
    }
}
