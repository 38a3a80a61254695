//! PostgreSQL repository tests. Run with a database:
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test repository_pg -- --ignored
//! ```

use sqlx::PgPool;
use std::sync::Arc;
use shortlink::domain::entities::{NewAccount, NewLink};
use shortlink::domain::repositories::{AccountRepository, LinkRepository, Reservation};
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};

fn new_link(slug: &str, owner_id: Option<i64>) -> NewLink {
    NewLink {
        slug: slug.to_string(),
        original_url: "https://example.com".to_string(),
        owner_id,
    }
}

async fn create_account(pool: &PgPool, email: &str) -> i64 {
    PgAccountRepository::new(Arc::new(pool.clone()))
        .create(NewAccount::new(email, "hash".to_string()))
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_reserve_and_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let first = repo.reserve(new_link("abc123", None)).await.unwrap();
    let Reservation::Reserved(link) = first else {
        panic!("expected reservation");
    };
    assert_eq!(link.slug, "abc123");
    assert_eq!(link.clicks, 0);
    assert_eq!(link.owner_id, None);

    let second = repo.reserve(new_link("abc123", None)).await.unwrap();
    assert_eq!(second, Reservation::Conflict);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_slugs_are_case_sensitive(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(matches!(
        repo.reserve(new_link("Promo", None)).await.unwrap(),
        Reservation::Reserved(_)
    ));
    assert!(matches!(
        repo.reserve(new_link("promo", None)).await.unwrap(),
        Reservation::Reserved(_)
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_clicks(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.reserve(new_link("counted", None)).await.unwrap();

    for expected in 1..=3 {
        let link = repo.increment_clicks("counted").await.unwrap().unwrap();
        assert_eq!(link.clicks, expected);
    }

    assert!(repo.increment_clicks("missing").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_increments(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.reserve(new_link("busy", None)).await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.increment_clicks("busy").await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let link = repo.find_by_slug("busy").await.unwrap().unwrap();
    assert_eq!(link.clicks, 20);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_by_owner_newest_first(pool: PgPool) {
    let owner = create_account(&pool, "owner@example.com").await;
    let other = create_account(&pool, "other@example.com").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.reserve(new_link("one", Some(owner))).await.unwrap();
    repo.reserve(new_link("two", Some(owner))).await.unwrap();
    repo.reserve(new_link("theirs", Some(other))).await.unwrap();
    repo.reserve(new_link("nobody", None)).await.unwrap();

    let links = repo.list_by_owner(owner).await.unwrap();
    let slugs: Vec<_> = links.iter().map(|l| l.slug.as_str()).collect();

    assert_eq!(slugs, vec!["two", "one"]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_frees_slug(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let Reservation::Reserved(link) = repo.reserve(new_link("gone", None)).await.unwrap() else {
        panic!("expected reservation");
    };

    assert!(repo.delete(&link).await.unwrap());
    assert!(!repo.delete(&link).await.unwrap());
    assert!(repo.find_by_id(link.id).await.unwrap().is_none());
    assert!(matches!(
        repo.reserve(new_link("gone", None)).await.unwrap(),
        Reservation::Reserved(_)
    ));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_account_email(pool: PgPool) {
    let repo = PgAccountRepository::new(Arc::new(pool));

    let account = repo
        .create(NewAccount::new("dup@example.com", "hash".to_string()))
        .await
        .unwrap();
    assert_eq!(
        repo.find_by_email("dup@example.com").await.unwrap().unwrap().id,
        account.id
    );

    let duplicate = repo
        .create(NewAccount::new("DUP@example.com", "hash".to_string()))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict { .. })));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.health_check().await);
}
