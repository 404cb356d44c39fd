//! Review constraints: rating bounds, one review per product per user

mod common;

use bazaar_server::db::models::{ReviewCreate, ReviewUpdate};
use bazaar_server::db::repository::RepoError;
use shared::ErrorCode;

use common::{seed_category, seed_product, seed_user, test_state};

fn review(product_id: i64, rating: i64) -> ReviewCreate {
    ReviewCreate {
        product_id,
        rating,
        title: None,
        comment: Some("fine".into()),
    }
}

#[tokio::test]
async fn rating_must_be_one_to_five() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "user@example.com").await;
    let cat = seed_category(&ctx.state, "Books").await;
    let product = seed_product(&ctx.state, cat, "Novel", 15.0, 10, 0).await;

    for bad in [0, 6, -1] {
        let err = ctx
            .state
            .reviews
            .create(user, review(product, bad))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::InvalidState(ErrorCode::InvalidRating, _)
        ));
    }
    assert!(ctx.state.reviews.create(user, review(product, 5)).await.is_ok());
}

#[tokio::test]
async fn second_review_for_same_product_is_rejected() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "user@example.com").await;
    let cat = seed_category(&ctx.state, "Books").await;
    let product = seed_product(&ctx.state, cat, "Novel", 15.0, 10, 0).await;

    ctx.state.reviews.create(user, review(product, 4)).await.unwrap();
    let err = ctx
        .state
        .reviews
        .create(user, review(product, 2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Conflict(ErrorCode::DuplicateReview, _)
    ));
}

#[tokio::test]
async fn deleting_a_review_allows_reviewing_again() {
    let ctx = test_state().await;
    let user = seed_user(&ctx.state, "user@example.com").await;
    let cat = seed_category(&ctx.state, "Books").await;
    let product = seed_product(&ctx.state, cat, "Novel", 15.0, 10, 0).await;

    let first = ctx.state.reviews.create(user, review(product, 4)).await.unwrap();
    ctx.state.reviews.delete(user, first.id).await.unwrap();
    assert!(ctx.state.reviews.create(user, review(product, 3)).await.is_ok());
}

#[tokio::test]
async fn summary_reports_average_and_distribution() {
    let ctx = test_state().await;
    let cat = seed_category(&ctx.state, "Books").await;
    let product = seed_product(&ctx.state, cat, "Novel", 15.0, 10, 0).await;

    for (i, rating) in [5, 5, 3, 1].iter().enumerate() {
        let user = seed_user(&ctx.state, &format!("reviewer{i}@example.com")).await;
        ctx.state
            .reviews
            .create(user, review(product, *rating))
            .await
            .unwrap();
    }

    let summary = ctx.state.reviews.summary(product).await.unwrap();
    assert_eq!(summary.review_count, 4);
    assert_eq!(summary.average_rating, 3.5);
    assert_eq!(summary.rating5_count, 2);
    assert_eq!(summary.rating3_count, 1);
    assert_eq!(summary.rating1_count, 1);
    assert_eq!(summary.rating2_count, 0);
}

#[tokio::test]
async fn updates_are_owner_scoped_and_revalidated() {
    let ctx = test_state().await;
    let author = seed_user(&ctx.state, "author@example.com").await;
    let other = seed_user(&ctx.state, "other@example.com").await;
    let cat = seed_category(&ctx.state, "Books").await;
    let product = seed_product(&ctx.state, cat, "Novel", 15.0, 10, 0).await;

    let created = ctx.state.reviews.create(author, review(product, 4)).await.unwrap();

    let err = ctx
        .state
        .reviews
        .update(
            other,
            created.id,
            ReviewUpdate {
                rating: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ErrorCode::ReviewNotFound)));

    let err = ctx
        .state
        .reviews
        .update(
            author,
            created.id,
            ReviewUpdate {
                rating: Some(9),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::InvalidState(ErrorCode::InvalidRating, _)
    ));
}
