//! End-to-end HTTP checks through the full router and middleware stack

mod common;

use axum::body::Body;
use axum::Router;
use bazaar_server::routes::build_app;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{seed_category, seed_product, test_state};

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "password123",
            "firstName": "Smoke",
            "lastName": "Tester",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_is_open() {
    let ctx = test_state().await;
    let app = build_app(ctx.state.clone());
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let ctx = test_state().await;
    let app = build_app(ctx.state.clone());

    let (status, body) = send(&app, Method::GET, "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = send(&app, Method::GET, "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn garbage_tokens_are_rejected() {
    let ctx = test_state().await;
    let app = build_app(ctx.state.clone());
    let (status, _) = send(&app, Method::GET, "/api/orders", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_profile_round_trip() {
    let ctx = test_state().await;
    let app = build_app(ctx.state.clone());

    let token = register(&app, "smoke@example.com").await;

    let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "smoke@example.com");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "smoke@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "smoke@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1002);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let ctx = test_state().await;
    let app = build_app(ctx.state.clone());

    register(&app, "dup@example.com").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "dup@example.com",
            "password": "password123",
            "firstName": "Dup",
            "lastName": "User",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);
}

#[tokio::test]
async fn order_lifecycle_over_http() {
    let ctx = test_state().await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "Mouse", 100.0, 10, 10).await;
    let app = build_app(ctx.state.clone());

    let token = register(&app, "buyer@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({
            "shippingAddress": "1 Smoke Street",
            "orderItems": [{ "productId": product, "quantity": 2 }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "place failed: {body}");
    assert_eq!(body["data"]["totalAmount"], 180.0);
    let order_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::GET, "/api/orders", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{order_id}/cancel"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Cancelled");

    // Second cancel surfaces the precise conflict code.
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/orders/{order_id}/cancel"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4004);
}

#[tokio::test]
async fn insufficient_stock_maps_to_bad_request() {
    let ctx = test_state().await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    let product = seed_product(&ctx.state, cat, "Rare Item", 10.0, 1, 0).await;
    let app = build_app(ctx.state.clone());

    let token = register(&app, "greedy@example.com").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({
            "shippingAddress": "1 Smoke Street",
            "orderItems": [{ "productId": product, "quantity": 5 }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6002);
}

#[tokio::test]
async fn email_change_requires_the_current_password() {
    let ctx = test_state().await;
    let app = build_app(ctx.state.clone());

    let token = register(&app, "old@example.com").await;
    register(&app, "taken@example.com").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/security/email",
        Some(&token),
        Some(json!({ "newEmail": "new@example.com", "currentPassword": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 8003);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/security/email",
        Some(&token),
        Some(json!({ "newEmail": "taken@example.com", "currentPassword": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/security/email",
        Some(&token),
        Some(json!({ "newEmail": "new@example.com", "currentPassword": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "new@example.com");
    assert_eq!(body["data"]["isEmailVerified"], false);
}

#[tokio::test]
async fn featured_products_are_public_and_filtered_by_discount() {
    let ctx = test_state().await;
    let cat = seed_category(&ctx.state, "Electronics").await;
    seed_product(&ctx.state, cat, "Deep Discount", 50.0, 5, 40).await;
    seed_product(&ctx.state, cat, "Full Price", 50.0, 5, 0).await;
    let app = build_app(ctx.state.clone());

    let (status, body) = send(&app, Method::GET, "/api/products/featured", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["productName"], "Deep Discount");
}

#[tokio::test]
async fn cross_origin_access_is_closed_in_production() {
    let ctx = common::test_state_in_env("production").await;
    let app = build_app(ctx.state.clone());
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .header("origin", "https://elsewhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(!response.headers().contains_key("access-control-allow-origin"));

    let ctx = test_state().await;
    let app = build_app(ctx.state.clone());
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .header("origin", "https://elsewhere.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let ctx = test_state().await;
    let app = build_app(ctx.state.clone());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
