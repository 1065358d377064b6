//! Cache integration tests.
//!
//! Exercises the in-process cache through its public API: TTL expiry,
//! pattern invalidation, rate limiting and the owner key group used by
//! the workout service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trainlog::infra::cache::{user_email_key, user_id_key};
use trainlog::infra::Cache;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Payload {
    name: String,
    count: i32,
}

fn payload(count: i32) -> Payload {
    Payload {
        name: "fran".to_string(),
        count,
    }
}

#[tokio::test]
async fn test_set_and_get_round_trip() {
    let cache = Cache::new(64);

    cache.set("key", &payload(3)).await.unwrap();
    let hit: Option<Payload> = cache.get("key").await.unwrap();

    assert_eq!(hit, Some(payload(3)));
}

#[tokio::test]
async fn test_get_missing_key_returns_none() {
    let cache = Cache::new(64);

    let hit: Option<Payload> = cache.get("absent").await.unwrap();
    assert!(hit.is_none());
}

#[tokio::test]
async fn test_zero_ttl_entry_is_already_expired() {
    let cache = Cache::new(64);

    cache.set_with_ttl("key", &payload(1), 0).await.unwrap();

    let hit: Option<Payload> = cache.get("key").await.unwrap();
    assert!(hit.is_none());
    assert!(!cache.exists("key").await.unwrap());
}

#[tokio::test]
async fn test_delete_pattern_only_touches_matches() {
    let cache = Cache::new(64);
    let owner = Uuid::new_v4();
    let other = Uuid::new_v4();

    cache
        .set(&format!("owner:{}:session:a", owner), &payload(1))
        .await
        .unwrap();
    cache
        .set(&format!("owner:{}:session:b", owner), &payload(2))
        .await
        .unwrap();
    cache
        .set(&format!("owner:{}:session:a", other), &payload(3))
        .await
        .unwrap();

    let removed = cache
        .delete_pattern(&format!("owner:{}:*", owner))
        .await
        .unwrap();
    assert_eq!(removed, 2);

    let survivor: Option<Payload> = cache
        .get(&format!("owner:{}:session:a", other))
        .await
        .unwrap();
    assert_eq!(survivor, Some(payload(3)));
}

#[tokio::test]
async fn test_invalidate_owner_drops_whole_group() {
    let cache = Cache::new(64);
    let owner = Uuid::new_v4();

    cache
        .set(&format!("owner:{}:session:a", owner), &payload(1))
        .await
        .unwrap();
    cache
        .set(&format!("owner:{}:metcon:b", owner), &payload(2))
        .await
        .unwrap();

    let removed = cache.invalidate_owner(&owner).await.unwrap();
    assert_eq!(removed, 2);

    let hit: Option<Payload> = cache
        .get(&format!("owner:{}:session:a", owner))
        .await
        .unwrap();
    assert!(hit.is_none());
}

#[tokio::test]
async fn test_get_or_set_runs_factory_once() {
    let cache = Cache::new(64);

    let first: Payload = cache
        .get_or_set("key", 60, || async { Ok(payload(1)) })
        .await
        .unwrap();
    assert_eq!(first, payload(1));

    // Cached value wins; the second factory must not run
    let second: Payload = cache
        .get_or_set("key", 60, || async {
            panic!("factory ran on a warm cache")
        })
        .await
        .unwrap();
    assert_eq!(second, payload(1));
}

#[tokio::test]
async fn test_user_email_key_is_case_insensitive() {
    assert_eq!(user_email_key("Athlete@Example.COM"), user_email_key("athlete@example.com"));
}

#[tokio::test]
async fn test_user_helpers_round_trip() {
    use chrono::Utc;
    use trainlog::domain::{User, UserRole};

    let cache = Cache::new(64);
    let user = User {
        id: Uuid::new_v4(),
        email: "athlete@example.com".to_string(),
        password_hash: "hash".to_string(),
        display_name: "Athlete".to_string(),
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        last_login_at: None,
    };

    cache.set_user(&user).await.unwrap();
    cache.set_user_by_email(&user.email, &user).await.unwrap();

    assert!(cache.get_user(&user.id).await.unwrap().is_some());
    assert!(cache
        .get_user_by_email("ATHLETE@example.com")
        .await
        .unwrap()
        .is_some());

    cache.invalidate_user(&user.id, &user.email).await.unwrap();

    assert!(cache.get_user(&user.id).await.unwrap().is_none());
    assert!(!cache.exists(&user_id_key(&user.id)).await.unwrap());
}

#[tokio::test]
async fn test_rate_limit_counts_within_window() {
    let cache = Cache::new(64);

    let (count, allowed) = cache.check_rate_limit("auth:client", 2, 60).await.unwrap();
    assert_eq!(count, 1);
    assert!(allowed);

    let (count, allowed) = cache.check_rate_limit("auth:client", 2, 60).await.unwrap();
    assert_eq!(count, 2);
    assert!(allowed);

    let (count, allowed) = cache.check_rate_limit("auth:client", 2, 60).await.unwrap();
    assert_eq!(count, 3);
    assert!(!allowed);

    // A different identifier gets its own window
    let (count, allowed) = cache.check_rate_limit("auth:other", 2, 60).await.unwrap();
    assert_eq!(count, 1);
    assert!(allowed);
}
