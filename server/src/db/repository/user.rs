//! User Repository
//!
//! Password hashes come in pre-computed from the auth layer; this module
//! never sees a plaintext password.

use super::{RepoError, RepoResult};
use crate::db::models::{User, UserUpdate};
use crate::db::DbService;
use shared::util::{now_millis, snowflake_id};
use shared::ErrorCode;

#[derive(Clone)]
pub struct UserRepository {
    db: DbService,
}

impl UserRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    /// Fetch an active user by id
    pub async fn find_by_id(&self, id: i64) -> RepoResult<User> {
        let user: Option<User> =
            sqlx::query_as("SELECT * FROM users WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(self.db.read())
                .await?;
        user.ok_or(RepoError::NotFound(ErrorCode::UserNotFound))
    }

    /// Fetch an active user by email (login path)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user = sqlx::query_as("SELECT * FROM users WHERE email = ? AND is_active = 1")
            .bind(email)
            .fetch_optional(self.db.read())
            .await?;
        Ok(user)
    }

    /// Register a new user. Emails are unique among active accounts.
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
    ) -> RepoResult<User> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let dup: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = ? AND is_active = 1")
                .bind(email)
                .fetch_optional(&mut *tx)
                .await?;
        if dup.is_some() {
            return Err(RepoError::Conflict(
                ErrorCode::EmailExists,
                format!("Email '{email}' is already registered"),
            ));
        }

        let id = snowflake_id();
        sqlx::query(
            "INSERT INTO users (id, email, password_hash, first_name, last_name, \
             is_email_verified, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, 0, 1, ?, ?)",
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(User {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone_number: None,
            address: None,
            city: None,
            postal_code: None,
            is_email_verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial profile update
    pub async fn update_profile(&self, id: i64, data: UserUpdate) -> RepoResult<User> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let user: Option<User> =
            sqlx::query_as("SELECT * FROM users WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let mut user = user.ok_or(RepoError::NotFound(ErrorCode::UserNotFound))?;

        if let Some(first_name) = data.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = data.last_name {
            user.last_name = last_name;
        }
        if data.phone_number.is_some() {
            user.phone_number = data.phone_number;
        }
        if data.address.is_some() {
            user.address = data.address;
        }
        if data.city.is_some() {
            user.city = data.city;
        }
        if data.postal_code.is_some() {
            user.postal_code = data.postal_code;
        }
        user.updated_at = now;

        sqlx::query(
            "UPDATE users SET first_name = ?, last_name = ?, phone_number = ?, \
             address = ?, city = ?, postal_code = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.phone_number)
        .bind(&user.address)
        .bind(&user.city)
        .bind(&user.postal_code)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        Ok(user)
    }

    /// Change the account email. The new address must be unused and starts
    /// out unverified again.
    pub async fn update_email(&self, id: i64, email: &str) -> RepoResult<User> {
        let mut tx = self.db.write().begin().await?;
        let now = now_millis();

        let user: Option<User> =
            sqlx::query_as("SELECT * FROM users WHERE id = ? AND is_active = 1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let mut user = user.ok_or(RepoError::NotFound(ErrorCode::UserNotFound))?;

        let dup: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM users WHERE email = ? AND id != ? AND is_active = 1")
                .bind(email)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if dup.is_some() {
            return Err(RepoError::Conflict(
                ErrorCode::EmailExists,
                format!("Email '{email}' is already registered"),
            ));
        }

        sqlx::query(
            "UPDATE users SET email = ?, is_email_verified = 0, updated_at = ? WHERE id = ?",
        )
        .bind(email)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        user.email = email.to_string();
        user.is_email_verified = false;
        user.updated_at = now;
        Ok(user)
    }

    /// Replace the stored password hash
    pub async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ? AND is_active = 1",
        )
        .bind(password_hash)
        .bind(now_millis())
        .bind(id)
        .execute(self.db.write())
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(ErrorCode::UserNotFound));
        }
        Ok(())
    }
}
