//! Shared test fixtures: a temp-file SQLite database and seed helpers

use bazaar_server::auth::{hash_password, JwtConfig};
use bazaar_server::core::{AppState, Config};
use bazaar_server::db::models::{CategoryCreate, ProductCreate};
use bazaar_server::db::DbService;
use tempfile::TempDir;

pub struct TestContext {
    pub state: AppState,
    // Dropping the TempDir deletes the database file.
    _tmp: TempDir,
}

pub async fn test_state() -> TestContext {
    test_state_in_env("test").await
}

pub async fn test_state_in_env(environment: &str) -> TestContext {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db_path = tmp.path().join("test.db");
    let db = DbService::new(db_path.to_str().expect("utf8 path"))
        .await
        .expect("open test database");

    let config = Config {
        host: "127.0.0.1".into(),
        http_port: 0,
        database_path: db_path.display().to_string(),
        jwt: JwtConfig {
            secret: "test-secret".into(),
            expiry_hours: 1,
        },
        environment: environment.into(),
        request_timeout_ms: 5000,
    };

    TestContext {
        state: AppState::with_db(config, db),
        _tmp: tmp,
    }
}

/// Register a user and return their id
pub async fn seed_user(state: &AppState, email: &str) -> i64 {
    let hash = hash_password("password123").expect("hash");
    let user = state
        .users
        .create(email, &hash, "Test", "User")
        .await
        .expect("seed user");
    user.id
}

/// Create a category and return its id
pub async fn seed_category(state: &AppState, name: &str) -> i64 {
    let category = state
        .categories
        .create(CategoryCreate {
            category_name: name.into(),
            description: None,
            image_url: None,
        })
        .await
        .expect("seed category");
    category.id
}

/// Create a product and return its id
pub async fn seed_product(
    state: &AppState,
    category_id: i64,
    name: &str,
    unit_price: f64,
    stock: i64,
    discount: i64,
) -> i64 {
    let product = state
        .products
        .create(ProductCreate {
            product_name: name.into(),
            unit_price,
            unit_in_stock: stock,
            quantity_per_unit: None,
            description: None,
            image_url: None,
            discount,
            category_id,
        })
        .await
        .expect("seed product");
    product.id
}
