//! Concurrent order placement must never oversell

mod common;

use bazaar_server::db::models::{OrderCreate, OrderLine};
use common::{seed_category, seed_product, seed_user, test_state};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_orders_sell_exactly_the_available_stock() {
    let ctx = test_state().await;
    let cat = seed_category(&ctx.state, "Drops").await;
    let product = seed_product(&ctx.state, cat, "Limited Sneaker", 250.0, 5, 0).await;

    let mut buyers = Vec::new();
    for i in 0..10 {
        buyers.push(seed_user(&ctx.state, &format!("buyer{i}@example.com")).await);
    }

    let mut handles = Vec::new();
    for user in buyers {
        let state = ctx.state.clone();
        handles.push(tokio::spawn(async move {
            state
                .orders
                .place(
                    user,
                    OrderCreate {
                        shipping_address: "1 Race Street".into(),
                        billing_address: None,
                        order_items: vec![OrderLine {
                            product_id: product,
                            quantity: 1,
                        }],
                    },
                )
                .await
        }));
    }

    let mut successes = 0;
    let mut stock_failures = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(bazaar_server::db::repository::RepoError::InsufficientStock(..)) => {
                stock_failures += 1
            }
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 5);
    assert_eq!(stock_failures, 5);
    let remaining = ctx.state.products.find_by_id(product).await.unwrap();
    assert_eq!(remaining.unit_in_stock, 0);
}
