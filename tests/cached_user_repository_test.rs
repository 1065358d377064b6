//! Cached user repository tests.
//!
//! Verifies the read-through behavior of the caching decorator against a
//! mocked inner repository: hits skip the store, writes invalidate both
//! the id and email entries.

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use mockall::predicate::eq;
use uuid::Uuid;

use trainlog::domain::{User, UserRole};
use trainlog::errors::AppResult;
use trainlog::infra::repositories::CachedUserStore;
use trainlog::infra::{Cache, UserChanges, UserRepository};

mock! {
    UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
        async fn create(
            &self,
            email: String,
            password_hash: String,
            display_name: String,
        ) -> AppResult<User>;
        async fn update(&self, id: Uuid, changes: UserChanges) -> AppResult<User>;
        async fn record_login(&self, id: Uuid) -> AppResult<()>;
        async fn delete(&self, id: Uuid) -> AppResult<bool>;
    }
}

fn test_user(id: Uuid, email: &str) -> User {
    User {
        id,
        email: email.to_string(),
        password_hash: "hashed".to_string(),
        display_name: "Athlete".to_string(),
        role: UserRole::User,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        last_login_at: None,
    }
}

#[tokio::test]
async fn test_find_by_id_hits_store_once() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepo::new();
    repo.expect_find_by_id()
        .with(eq(user_id))
        .times(1)
        .returning(move |id| Ok(Some(test_user(id, "athlete@example.com"))));

    let store = CachedUserStore::new(repo, Cache::new(64));

    let first = store.find_by_id(user_id).await.unwrap();
    assert!(first.is_some());

    // Second read is served from the cache; the mock allows one call only
    let second = store.find_by_id(user_id).await.unwrap();
    assert_eq!(second.unwrap().id, user_id);
}

#[tokio::test]
async fn test_find_by_id_miss_is_not_cached() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepo::new();
    repo.expect_find_by_id().times(2).returning(|_| Ok(None));

    let store = CachedUserStore::new(repo, Cache::new(64));

    assert!(store.find_by_id(user_id).await.unwrap().is_none());
    assert!(store.find_by_id(user_id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_by_email_primes_cache_case_insensitively() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepo::new();
    repo.expect_find_by_email()
        .times(1)
        .returning(move |_| Ok(Some(test_user(user_id, "athlete@example.com"))));

    let store = CachedUserStore::new(repo, Cache::new(64));

    let first = store.find_by_email("Athlete@Example.COM").await.unwrap();
    assert!(first.is_some());

    // Different casing resolves to the same cache entry
    let second = store.find_by_email("athlete@example.com").await.unwrap();
    assert_eq!(second.unwrap().id, user_id);

    // The id entry was primed by the same read
    let by_id = store.find_by_id(user_id).await.unwrap();
    assert!(by_id.is_some());
}

#[tokio::test]
async fn test_update_invalidates_old_email_entry() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepo::new();

    // Initial read primes the cache under the old email
    repo.expect_find_by_email()
        .with(eq("old@example.com"))
        .times(1)
        .returning(move |_| Ok(Some(test_user(user_id, "old@example.com"))));

    // Update looks up the pre-update record for its email
    repo.expect_find_by_id()
        .with(eq(user_id))
        .returning(move |id| Ok(Some(test_user(id, "old@example.com"))));

    repo.expect_update()
        .times(1)
        .returning(move |id, _| Ok(test_user(id, "new@example.com")));

    // After invalidation the old email must reach the store again
    repo.expect_find_by_email()
        .with(eq("old@example.com"))
        .times(1)
        .returning(|_| Ok(None));

    let store = CachedUserStore::new(repo, Cache::new(64));

    store.find_by_email("old@example.com").await.unwrap();

    let changes = UserChanges {
        email: Some("new@example.com".to_string()),
        ..Default::default()
    };
    let updated = store.update(user_id, changes).await.unwrap();
    assert_eq!(updated.email, "new@example.com");

    assert!(store.find_by_email("old@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_invalidates_and_reports_outcome() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepo::new();

    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, "athlete@example.com"))));
    repo.expect_delete()
        .with(eq(user_id))
        .times(1)
        .returning(|_| Ok(true));

    let store = CachedUserStore::new(repo, Cache::new(64));

    // Warm the cache, then delete through the decorator
    store.find_by_id(user_id).await.unwrap();
    assert!(store.delete(user_id).await.unwrap());
}

#[tokio::test]
async fn test_delete_drops_owner_cached_reads() {
    let user_id = Uuid::new_v4();

    let mut repo = MockUserRepo::new();
    repo.expect_find_by_id()
        .returning(move |id| Ok(Some(test_user(id, "athlete@example.com"))));
    repo.expect_delete().times(1).returning(|_| Ok(true));

    // A cached session read under the owner's key group, as the workout
    // service would leave behind
    let cache = Cache::new(64);
    let session_key = format!("owner:{}:session:{}", user_id, Uuid::new_v4());
    cache.set(&session_key, &"cached session").await.unwrap();

    let store = CachedUserStore::new(repo, cache.clone());
    assert!(store.delete(user_id).await.unwrap());

    assert!(!cache.exists(&session_key).await.unwrap());
}

#[tokio::test]
async fn test_delete_missing_user_returns_false() {
    let mut repo = MockUserRepo::new();
    repo.expect_find_by_id().returning(|_| Ok(None));
    repo.expect_delete().returning(|_| Ok(false));

    let store = CachedUserStore::new(repo, Cache::new(64));
    assert!(!store.delete(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_create_is_a_passthrough() {
    let mut repo = MockUserRepo::new();
    repo.expect_create()
        .times(1)
        .returning(|email, _, _| Ok(test_user(Uuid::new_v4(), &email)));

    let store = CachedUserStore::new(repo, Cache::new(64));

    let user = store
        .create(
            "new@example.com".to_string(),
            "hashed".to_string(),
            "New Athlete".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(user.email, "new@example.com");
}
