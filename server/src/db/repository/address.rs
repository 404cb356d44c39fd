//! Address Repository
//!
//! Maintains the one-default-per-user invariant through
//! [`clear_other_defaults`], always inside the same transaction as the
//! write that sets the flag.

use super::{clear_other_defaults, RepoError, RepoResult};
use crate::db::models::{Address, AddressCreate, AddressUpdate};
use crate::db::DbService;
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;

const TABLE: &str = "addresses";

#[derive(Clone)]
pub struct AddressRepository {
    db: DbService,
}

impl AddressRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// List a user's addresses, default first then newest
    pub async fn find_by_user(&self, user_id: i64) -> RepoResult<Vec<Address>> {
        let addresses = sqlx::query_as(
            "SELECT * FROM addresses WHERE user_id = ? AND is_active = 1 \
             ORDER BY is_default DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.db.read())
        .await?;
        Ok(addresses)
    }

    /// Fetch one of the user's addresses
    pub async fn find_by_id(&self, user_id: i64, id: i64) -> RepoResult<Address> {
        let address: Option<Address> = sqlx::query_as(
            "SELECT * FROM addresses WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(self.db.read())
        .await?;
        address.ok_or(RepoError::NotFound(ErrorCode::AddressNotFound))
    }

    /// Create an address for the user
    pub async fn create(&self, user_id: i64, data: AddressCreate) -> RepoResult<Address> {
        if data.title.trim().is_empty() || data.full_address.trim().is_empty() {
            return Err(RepoError::Validation(
                "Title and address are required".into(),
            ));
        }

        let mut tx = self.db.write().begin().await?;
        let now = now_millis();
        let id = snowflake_id();

        if data.is_default {
            clear_other_defaults(&mut tx, TABLE, user_id, id).await?;
        }

        let country = data.country.unwrap_or_else(|| "Turkey".to_string());
        sqlx::query(
            "INSERT INTO addresses (id, user_id, title, full_address, city, district, \
             postal_code, country, phone_number, is_default, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.title)
        .bind(&data.full_address)
        .bind(&data.city)
        .bind(&data.district)
        .bind(&data.postal_code)
        .bind(&country)
        .bind(&data.phone_number)
        .bind(data.is_default)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(Address {
            id,
            user_id,
            title: data.title,
            full_address: data.full_address,
            city: data.city,
            district: data.district,
            postal_code: data.postal_code,
            country,
            phone_number: data.phone_number,
            is_default: data.is_default,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Update one of the user's addresses. Other defaults are cleared only
    /// when this update newly sets the flag.
    pub async fn update(&self, user_id: i64, id: i64, data: AddressUpdate) -> RepoResult<Address> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let address: Option<Address> = sqlx::query_as(
            "SELECT * FROM addresses WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let mut address = address.ok_or(RepoError::NotFound(ErrorCode::AddressNotFound))?;

        if let Some(is_default) = data.is_default {
            if is_default && !address.is_default {
                clear_other_defaults(&mut tx, TABLE, user_id, id).await?;
            }
            address.is_default = is_default;
        }
        if let Some(title) = data.title {
            address.title = title;
        }
        if let Some(full_address) = data.full_address {
            address.full_address = full_address;
        }
        if let Some(city) = data.city {
            address.city = city;
        }
        if data.district.is_some() {
            address.district = data.district;
        }
        if data.postal_code.is_some() {
            address.postal_code = data.postal_code;
        }
        if let Some(country) = data.country {
            address.country = country;
        }
        if data.phone_number.is_some() {
            address.phone_number = data.phone_number;
        }
        address.updated_at = now;

        sqlx::query(
            "UPDATE addresses SET title = ?, full_address = ?, city = ?, district = ?, \
             postal_code = ?, country = ?, phone_number = ?, is_default = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&address.title)
        .bind(&address.full_address)
        .bind(&address.city)
        .bind(&address.district)
        .bind(&address.postal_code)
        .bind(&address.country)
        .bind(&address.phone_number)
        .bind(address.is_default)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(address)
    }

    /// Make one of the user's addresses the default
    pub async fn set_default(&self, user_id: i64, id: i64) -> RepoResult<Address> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let address: Option<Address> = sqlx::query_as(
            "SELECT * FROM addresses WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        let mut address = address.ok_or(RepoError::NotFound(ErrorCode::AddressNotFound))?;

        clear_other_defaults(&mut tx, TABLE, user_id, id).await?;
        sqlx::query("UPDATE addresses SET is_default = 1, updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        address.is_default = true;
        address.updated_at = now;
        Ok(address)
    }

    /// Soft-delete one of the user's addresses
    pub async fn delete(&self, user_id: i64, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE addresses SET is_active = 0, is_default = 0, updated_at = ? \
             WHERE id = ? AND user_id = ? AND is_active = 1",
        )
        .bind(now_millis())
        .bind(id)
        .bind(user_id)
        .execute(self.db.write())
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::AddressNotFound));
        }
        Ok(())
    }
}
