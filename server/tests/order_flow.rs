//! Order placement and cancellation workflows

mod common;

use bazaar_server::db::models::{OrderCreate, OrderLine, OrderStatus, Pagination, ProductUpdate};
use bazaar_server::db::repository::RepoError;
use shared::ErrorCode;

use common::{seed_category, seed_product, seed_user, test_state};

fn order_of(product_id: i64, quantity: i64) -> OrderCreate {
    OrderCreate {
        shipping_address: "1 Test Street".into(),
        billing_address: None,
        order_items: vec![OrderLine {
            product_id,
            quantity,
        }],
    }
}

#[tokio::test]
async fn place_order_computes_discounted_total_and_reserves_stock() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "buyer@example.com").await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "Mouse", 100.0, 10, 10).await;

    let detail = ctx
        .state
        .orders
        .place(user, order_of(product, 2))
        .await
        .unwrap();

    // 100 * 0.90 * 2
    assert_eq!(detail.total_amount, 180.0);
    assert_eq!(detail.status, OrderStatus::Pending);
    assert_eq!(detail.order_items.len(), 1);
    assert_eq!(detail.order_items[0].total_price, 180.0);
    assert_eq!(detail.billing_address, "1 Test Street");
    assert!(detail.order_number.starts_with("ORD-"));

    let stocked = ctx.state.products.find_by_id(product).await.unwrap();
    assert_eq!(stocked.unit_in_stock, 8);
}

#[tokio::test]
async fn place_order_rejects_empty_item_list() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "buyer@example.com").await;

    let err = ctx
        .state
        .orders
        .place(
            user,
            OrderCreate {
                shipping_address: "1 Test Street".into(),
                billing_address: None,
                order_items: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidState(ErrorCode::EmptyOrder, _)
    ));
}

#[tokio::test]
async fn failed_line_rolls_back_the_whole_order() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "buyer@example.com").await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let plenty = seed_product(&ctx.state, cat, "Cable", 5.0, 100, 0).await;
    let scarce = seed_product(&ctx.state, cat, "GPU", 900.0, 1, 0).await;

    let err = ctx
        .state
        .orders
        .place(
            user,
            OrderCreate {
                shipping_address: "1 Test Street".into(),
                billing_address: None,
                order_items: vec![
                    OrderLine {
                        product_id: plenty,
                        quantity: 3,
                    },
                    OrderLine {
                        product_id: scarce,
                        quantity: 2,
                    },
                ],
            },
        )
        .await
        .unwrap_err();
    assert!(
        matches!(&err, RepoError::InsufficientStock(id, name) if *id == scarce && name == "GPU")
    );

    // First line's decrement must have been rolled back.
    let cable = ctx.state.products.find_by_id(plenty).await.unwrap();
    assert_eq!(cable.unit_in_stock, 100);
    let orders = ctx
        .state
        .orders
        .find_by_user(user, Pagination::default())
        .await
        .unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn cancel_restores_stock_and_repeat_cancel_is_rejected() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "buyer@example.com").await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "Keyboard", 50.0, 5, 0).await;

    let detail = ctx
        .state
        .orders
        .place(user, order_of(product, 3))
        .await
        .unwrap();
    assert_eq!(
        ctx.state
            .products
            .find_by_id(product)
            .await
            .unwrap()
            .unit_in_stock,
        2
    );

    let cancelled = ctx.state.orders.cancel(user, detail.id).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        ctx.state
            .products
            .find_by_id(product)
            .await
            .unwrap()
            .unit_in_stock,
        5
    );

    let err = ctx.state.orders.cancel(user, detail.id).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidState(ErrorCode::OrderAlreadyCancelled, _)
    ));
    // Stock must not be restored twice.
    assert_eq!(
        ctx.state
            .products
            .find_by_id(product)
            .await
            .unwrap()
            .unit_in_stock,
        5
    );
}

#[tokio::test]
async fn shipped_orders_cannot_be_cancelled() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "buyer@example.com").await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "Monitor", 200.0, 4, 0).await;

    let detail = ctx
        .state
        .orders
        .place(user, order_of(product, 1))
        .await
        .unwrap();
    ctx.state
        .orders
        .update_status(detail.id, OrderStatus::Shipped)
        .await
        .unwrap();

    let err = ctx.state.orders.cancel(user, detail.id).await.unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidState(ErrorCode::OrderNotCancellable, _)
    ));
}

#[tokio::test]
async fn cancellation_goes_through_its_own_path_only() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "buyer@example.com").await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "Webcam", 80.0, 4, 0).await;

    let detail = ctx
        .state
        .orders
        .place(user, order_of(product, 1))
        .await
        .unwrap();
    let err = ctx
        .state
        .orders
        .update_status(detail.id, OrderStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidState(ErrorCode::InvalidOrderStatus, _)
    ));
}

#[tokio::test]
async fn order_total_survives_later_price_changes() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "buyer@example.com").await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "SSD", 120.0, 10, 0).await;

    let detail = ctx
        .state
        .orders
        .place(user, order_of(product, 1))
        .await
        .unwrap();
    assert_eq!(detail.total_amount, 120.0);

    ctx.state
        .products
        .update(
            product,
            ProductUpdate {
                unit_price: Some(999.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let reloaded = ctx.state.orders.find_for_user(user, detail.id).await.unwrap();
    assert_eq!(reloaded.total_amount, 120.0);
    assert_eq!(reloaded.order_items[0].unit_price, 120.0);
    assert_eq!(reloaded.order_items[0].total_price, 120.0);
}

#[tokio::test]
async fn orders_are_scoped_to_their_owner() {
    let ctx = test_state().await;
    let alice = seed_user(&ctx.state, "alice@example.com").await;
    let mallory = seed_user(&ctx.state, "mallory@example.com").await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "Dock", 60.0, 5, 0).await;

    let detail = ctx
        .state
        .orders
        .place(alice, order_of(product, 1))
        .await
        .unwrap();

    let err = ctx
        .state
        .orders
        .find_for_user(mallory, detail.id)
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ErrorCode::OrderNotFound)));

    let err = ctx.state.orders.cancel(mallory, detail.id).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ErrorCode::OrderNotFound)));
}

#[tokio::test]
async fn placing_an_order_notifies_the_buyer() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "buyer@example.com").await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "Hub", 40.0, 5, 0).await;

    ctx.state
        .orders
        .place(user, order_of(product, 1))
        .await
        .unwrap();

    let summary = ctx.state.notifications.summary(user).await.unwrap();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.unread, 1);
    let notifications = ctx
        .state
        .notifications
        .find_by_user(user, Pagination::default())
        .await
        .unwrap();
    assert_eq!(notifications[0].kind, "Order");
}
