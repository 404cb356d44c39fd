//! One-default-per-user invariant for addresses and payment methods

mod common;

use bazaar_server::db::models::{AddressCreate, AddressUpdate, PaymentMethodCreate};
use bazaar_server::db::repository::RepoError;
use shared::ErrorCode;

use common::{seed_user, test_state};

fn address(title: &str, is_default: bool) -> AddressCreate {
    AddressCreate {
        title: title.into(),
        full_address: "42 Elm Street".into(),
        city: "Istanbul".into(),
        district: None,
        postal_code: None,
        country: None,
        phone_number: None,
        is_default,
    }
}

fn card(number: &str, is_default: bool) -> PaymentMethodCreate {
    PaymentMethodCreate {
        method_type: "CreditCard".into(),
        card_holder_name: Some("Test User".into()),
        card_number: Some(number.into()),
        expiry_month: Some(12),
        expiry_year: Some(2030),
        bank_name: None,
        account_holder_name: None,
        is_default,
    }
}

async fn default_address_count(
    state: &bazaar_server::core::AppState,
    user: i64,
) -> usize {
    state
        .addresses
        .find_by_user(user)
        .await
        .unwrap()
        .iter()
        .filter(|a| a.is_default)
        .count()
}

#[tokio::test]
async fn creating_a_new_default_address_demotes_the_old_one() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "user@example.com").await;

    let home = ctx
        .state
        .addresses
        .create(user, address("Home", true))
        .await
        .unwrap();
    assert!(home.is_default);

    let office = ctx
        .state
        .addresses
        .create(user, address("Office", true))
        .await
        .unwrap();
    assert!(office.is_default);

    let home = ctx.state.addresses.find_by_id(user, home.id).await.unwrap();
    assert!(!home.is_default);
    assert_eq!(default_address_count(&ctx.state, user).await, 1);
}

#[tokio::test]
async fn update_clears_other_defaults_only_when_newly_set() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "user@example.com").await;

    let home = ctx
        .state
        .addresses
        .create(user, address("Home", true))
        .await
        .unwrap();
    let office = ctx
        .state
        .addresses
        .create(user, address("Office", false))
        .await
        .unwrap();

    // Touching an unrelated field must not move the default.
    ctx.state
        .addresses
        .update(
            user,
            office.id,
            AddressUpdate {
                city: Some("Ankara".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(ctx
        .state
        .addresses
        .find_by_id(user, home.id)
        .await
        .unwrap()
        .is_default);

    // Newly setting the flag does.
    ctx.state
        .addresses
        .update(
            user,
            office.id,
            AddressUpdate {
                is_default: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!ctx
        .state
        .addresses
        .find_by_id(user, home.id)
        .await
        .unwrap()
        .is_default);
    assert_eq!(default_address_count(&ctx.state, user).await, 1);
}

#[tokio::test]
async fn set_default_moves_the_flag() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "user@example.com").await;

    let a = ctx
        .state
        .addresses
        .create(user, address("A", true))
        .await
        .unwrap();
    let b = ctx
        .state
        .addresses
        .create(user, address("B", false))
        .await
        .unwrap();

    ctx.state.addresses.set_default(user, b.id).await.unwrap();
    assert!(!ctx
        .state
        .addresses
        .find_by_id(user, a.id)
        .await
        .unwrap()
        .is_default);
    assert_eq!(default_address_count(&ctx.state, user).await, 1);
}

#[tokio::test]
async fn defaults_are_scoped_per_user() {
    let ctx = test_state().await;
    let alice = seed_user(&ctx.state, "alice@example.com").await;
    let bob = seed_user(&ctx.state, "bob@example.com").await;

    ctx.state
        .addresses
        .create(alice, address("Home", true))
        .await
        .unwrap();
    ctx.state
        .addresses
        .create(bob, address("Home", true))
        .await
        .unwrap();

    assert_eq!(default_address_count(&ctx.state, alice).await, 1);
    assert_eq!(default_address_count(&ctx.state, bob).await, 1);
}

#[tokio::test]
async fn payment_methods_keep_a_single_default_and_reject_duplicates() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "user@example.com").await;

    let first = ctx
        .state
        .payment_methods
        .create(user, card("4242 4242 4242 4242", true))
        .await
        .unwrap();
    assert!(first.is_default);
    assert_eq!(first.card_last4.as_deref(), Some("4242"));
    assert!(first.card_fingerprint.is_some());

    let second = ctx
        .state
        .payment_methods
        .create(user, card("5555 5555 5555 4444", true))
        .await
        .unwrap();
    assert!(second.is_default);

    let methods = ctx.state.payment_methods.find_by_user(user).await.unwrap();
    assert_eq!(methods.iter().filter(|m| m.is_default).count(), 1);

    // Same digits with different spacing is the same card.
    let err = ctx
        .state
        .payment_methods
        .create(user, card("4242-4242-4242-4242", false))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Conflict(ErrorCode::DuplicateCard, _)
    ));
}

#[tokio::test]
async fn card_numbers_are_never_stored_verbatim() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "user@example.com").await;

    let method = ctx
        .state
        .payment_methods
        .create(user, card("4242424242424242", false))
        .await
        .unwrap();

    let fp = method.card_fingerprint.unwrap();
    assert_ne!(fp, "4242424242424242");
    assert_eq!(fp.len(), 64);
    let view: bazaar_server::db::models::PaymentMethodView =
        ctx.state
            .payment_methods
            .find_by_id(user, method.id)
            .await
            .unwrap()
            .into();
    assert_eq!(view.masked_card_number.as_deref(), Some("**** **** **** 4242"));
}
