//! Default-flag maintenance shared by addresses and payment methods
//!
//! Both tables promise at most one `is_default = 1` row per user. Every
//! write that sets a default clears the user's other defaults inside the
//! same transaction.

use super::RepoResult;
use shared::util::now_millis;
use sqlx::{Sqlite, Transaction};

/// Tables allowed through [`clear_other_defaults`]. The table name is
/// interpolated into SQL, so it must come from this fixed list.
const DEFAULT_FLAG_TABLES: [&str; 2] = ["addresses", "payment_methods"];

/// Clear `is_default` on every active row of `table` belonging to `user_id`
/// except `exclude_id`. Pass `exclude_id = 0` to clear all of them.
pub(crate) async fn clear_other_defaults(
    tx: &mut Transaction<'_, Sqlite>,
    table: &str,
    user_id: i64,
    exclude_id: i64,
) -> RepoResult<()> {
    debug_assert!(DEFAULT_FLAG_TABLES.contains(&table));

    let sql = format!(
        "UPDATE {table} SET is_default = 0, updated_at = ? \
         WHERE user_id = ? AND id != ? AND is_default = 1 AND is_active = 1"
    );
    sqlx::query(&sql)
        .bind(now_millis())
        .bind(user_id)
        .bind(exclude_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
