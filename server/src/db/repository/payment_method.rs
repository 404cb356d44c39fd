//! Payment Method Repository
//!
//! Card numbers are reduced to a display suffix and a SHA-256 fingerprint
//! at the door; the raw number never reaches a table. Shares the
//! one-default-per-user maintenance with addresses.

use super::{clear_other_defaults, RepoError, RepoResult};
use crate::db::models::{PaymentMethod, PaymentMethodCreate, PaymentMethodUpdate};
use crate::db::DbService;
use sha2::{Digest, Sha256};
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;

const TABLE: &str = "payment_methods";

#[derive(Clone)]
pub struct PaymentMethodRepository {
    db: DbService,
}

impl PaymentMethodRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// List a user's payment methods, default first then newest
    pub async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<PaymentMethod>> {
        let methods = sqlx::query_as(
            "SELECT * FROM payment_methods WHERE user_id = ? AND is_active = 1 \
             ORDER BY is_default DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.db.read())
        .await?;
        Ok(methods)
    }

    /// Fetch one of the user's payment methods
    pub async fn find_by_id(&self, user_id: i64, id: i64) -> RepoResult<PaymentMethod> {
        let method: Option<PaymentMethod> = sqlx::query_as(
            "SELECT * FROM payment_methods WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.db.read())
        .await?;
        method.ok_or(RepoError::NotFound(ErrorCode::PaymentMethodNotFound))
    }

    /// Add a payment method. Duplicate cards (same fingerprint) are rejected.
    pub async fn create(
        &self,
        user_id: i64,
        data: PaymentMethodCreate,
    ) -> RepoResult<PaymentMethod> {
        let (card_last4, card_fingerprint) = match data.method_type.as_str() {
            "CreditCard" | "DebitCard" => {
                let number = data
                    .card_number
                    .as_deref()
                    .ok_or_else(|| RepoError::Validation("Card number is required".into()))?;
                let digits = normalize_card_number(number)?;
                validate_expiry(data.expiry_month, data.expiry_year)?;
                let last4 = digits[digits.len() - 4..].to_string();
                (Some(last4), Some(fingerprint(&digits)))
            }
            "BankTransfer" => {
                if data.bank_name.as_deref().is_none_or(str::is_empty) {
                    return Err(RepoError::Validation("Bank name is required".into()));
                }
                (None, None)
            }
            other => {
                return Err(RepoError::Validation(format!(
                    "Unknown payment method type: {other}"
                )));
            }
        };

        let mut tx = self.db.write().begin().await?;
        let now = now_millis();
        let id = snowflake_id();

        if let Some(fp) = &card_fingerprint {
            let dup: Option<(i64,)> = sqlx::query_as(
                "SELECT id FROM payment_methods \
                 WHERE user_id = ? AND card_fingerprint = ? AND is_active = 1",
            )
            .bind(user_id)
            .bind(fp)
            .fetch_optional(&mut *tx)
            .await?;
            if dup.is_some() {
                return Err(RepoError::Conflict(
                    ErrorCode::DuplicateCard,
                    "This card is already saved".into(),
                ));
            }
        }

        if data.is_default {
            clear_other_defaults(&mut tx, TABLE, user_id, id).await?;
        }

        sqlx::query(
            "INSERT INTO payment_methods (id, user_id, method_type, card_holder_name, \
             card_last4, card_fingerprint, expiry_month, expiry_year, bank_name, \
             account_holder_name, is_default, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.method_type)
        .bind(&data.card_holder_name)
        .bind(&card_last4)
        .bind(&card_fingerprint)
        .bind(data.expiry_month)
        .bind(data.expiry_year)
        .bind(&data.bank_name)
        .bind(&data.account_holder_name)
        .bind(data.is_default)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(PaymentMethod {
            id,
            user_id,
            method_type: data.method_type,
            card_holder_name: data.card_holder_name,
            card_last4,
            card_fingerprint,
            expiry_month: data.expiry_month,
            expiry_year: data.expiry_year,
            bank_name: data.bank_name,
            account_holder_name: data.account_holder_name,
            is_default: data.is_default,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Update one of the user's payment methods. The card number itself is
    /// immutable; replace the method to change it.
    pub async fn update(
        &self,
        user_id: i64,
        id: i64,
        data: PaymentMethodUpdate,
    ) -> RepoResult<PaymentMethod> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let method: Option<PaymentMethod> = sqlx::query_as(
            "SELECT * FROM payment_methods WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let mut method = method.ok_or(RepoError::NotFound(ErrorCode::PaymentMethodNotFound))?;

        if let Some(is_default) = data.is_default {
            if is_default && !method.is_default {
                clear_other_defaults(&mut tx, TABLE, user_id, id).await?;
            }
            method.is_default = is_default;
        }
        if data.card_holder_name.is_some() {
            method.card_holder_name = data.card_holder_name;
        }
        if data.expiry_month.is_some() {
            method.expiry_month = data.expiry_month;
        }
        if data.expiry_year.is_some() {
            method.expiry_year = data.expiry_year;
        }
        if matches!(method.method_type.as_str(), "CreditCard" | "DebitCard") {
            validate_expiry(method.expiry_month, method.expiry_year)?;
        }
        if data.bank_name.is_some() {
            method.bank_name = data.bank_name;
        }
        if data.account_holder_name.is_some() {
            method.account_holder_name = data.account_holder_name;
        }
        method.updated_at = now;

        sqlx::query(
            "UPDATE payment_methods SET card_holder_name = ?, expiry_month = ?, \
             expiry_year = ?, bank_name = ?, account_holder_name = ?, is_default = ?, \
             updated_at = ? WHERE id = ?",
        )
        .bind(&method.card_holder_name)
        .bind(method.expiry_month)
        .bind(method.expiry_year)
        .bind(&method.bank_name)
        .bind(&method.account_holder_name)
        .bind(method.is_default)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(method)
    }

    /// Make one of the user's payment methods the default
    pub async fn set_default(&self, user_id: i64, id: i64) -> RepoResult<PaymentMethod> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let method: Option<PaymentMethod> = sqlx::query_as(
            "SELECT * FROM payment_methods WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let mut method = method.ok_or(RepoError::NotFound(ErrorCode::PaymentMethodNotFound))?;

        clear_other_defaults(&mut tx, TABLE, user_id, id).await?;
        sqlx::query("UPDATE payment_methods SET is_default = 1, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        method.is_default = true;
        method.updated_at = now;
        Ok(method)
    }

    /// Soft-delete one of the user's payment methods
    pub async fn delete(&self, user_id: i64, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE payment_methods SET is_active = 0, is_default = 0, updated_at = ? \
             WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(now_millis())
        .bind(id)
        .bind(user_id)
        .execute(self.db.write())
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::PaymentMethodNotFound));
        }
        Ok(())
    }
}

/// Strip separators and check the number is 13-19 digits
fn normalize_card_number(raw: &str) -> RepoResult<String> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if digits.len() < 13 || digits.len() > 19 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(RepoError::InvalidState(
            ErrorCode::InvalidCard,
            "Card number must be 13 to 19 digits".into(),
        ));
    }
    Ok(digits)
}

fn validate_expiry(month: Option<i64>, year: Option<i64>) -> RepoResult<()> {
    let (Some(month), Some(year)) = (month, year) else {
        return Err(RepoError::Validation("Card expiry is required".into()));
    };
    if !(1..=12).contains(&month) || !(2000..=2100).contains(&year) {
        return Err(RepoError::InvalidState(
            ErrorCode::InvalidCard,
            "Card expiry is out of range".into(),
        ));
    }
    Ok(())
}

/// SHA-256 hex digest of the normalized card number, used only for
/// duplicate detection
fn fingerprint(digits: &str) -> String {
    hex::encode(Sha256::digest(digits.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_card_number_strips_separators() {
        let digits = normalize_card_number("4242 4242-4242 4242").unwrap();
        assert_eq!(digits, "4242424242424242");
    }

    #[test]
    fn test_normalize_card_number_rejects_short() {
        assert!(normalize_card_number("1234").is_err());
    }

    #[test]
    fn test_normalize_card_number_rejects_letters() {
        assert!(normalize_card_number("4242abcd42424242").is_err());
    }

    #[test]
    fn test_fingerprint_is_stable_hex() {
        let fp = fingerprint("4242424242424242");
        assert_eq!(fp.len(), 64);
        assert_eq!(fp, fingerprint("4242424242424242"));
    }

    #[test]
    fn test_validate_expiry() {
        assert!(validate_expiry(Some(12), Some(2030)).is_ok());
        assert!(validate_expiry(Some(13), Some(2030)).is_err());
        assert!(validate_expiry(None, Some(2030)).is_err());
    }
}
