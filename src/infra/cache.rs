//! In-process cache with per-entry TTL and pattern-based invalidation.
//!
//! Backed by an LRU map behind an async lock; the map doubles as the key
//! index that pattern invalidation scans. The cache is strictly an
//! optimization: read-path failures are reported as errors so callers can
//! degrade to the source of truth, and every write path in the decorated
//! repositories invalidates the keys a stale read could observe.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use lru::LruCache;
use regex::Regex;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::{
    owner_pattern, CACHE_PREFIX_RATE_LIMIT, CACHE_PREFIX_USER_EMAIL, CACHE_PREFIX_USER_ID,
    CACHE_TTL_MEDIUM_SECONDS, DEFAULT_CACHE_MAX_ENTRIES,
};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// A cached value with its expiry instant.
#[derive(Debug, Clone)]
struct CacheEntry {
    json: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn new(json: String, ttl: Duration) -> Self {
        Self {
            json,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Process-wide key-value cache with TTL expiry and LRU eviction.
///
/// Cloning is cheap; all clones share the same store. Constructed once at
/// startup and handed to collaborators through injection.
#[derive(Clone)]
pub struct Cache {
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    default_ttl: Duration,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_MAX_ENTRIES)
    }
}

impl Cache {
    /// Create a cache bounded at `max_entries` (LRU eviction beyond that).
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries)
            .unwrap_or_else(|| NonZeroUsize::new(DEFAULT_CACHE_MAX_ENTRIES).unwrap());

        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            default_ttl: Duration::from_secs(CACHE_TTL_MEDIUM_SECONDS),
        }
    }

    // =========================================================================
    // Generic Cache Operations
    // =========================================================================

    /// Get a value from cache. Expired entries count as misses and are
    /// evicted on the way out.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let mut store = self.store.write().await;

        let json = match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                return Ok(None);
            }
            Some(entry) => entry.json.clone(),
            None => return Ok(None),
        };
        drop(store);

        let parsed = serde_json::from_str(&json)
            .map_err(|e| AppError::internal(format!("Cache deserialization error: {}", e)))?;
        Ok(Some(parsed))
    }

    /// Set a value in cache with the default TTL.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        self.set_with_ttl(key, value, self.default_ttl.as_secs())
            .await
    }

    /// Set a value in cache with a custom TTL (in seconds). Overwrites any
    /// existing entry at that key.
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::internal(format!("Cache serialization error: {}", e)))?;

        let entry = CacheEntry::new(json, Duration::from_secs(ttl_seconds));
        self.store.write().await.put(key.to_string(), entry);
        Ok(())
    }

    /// Delete a value from cache; no-op when absent.
    pub async fn delete(&self, key: &str) -> AppResult<()> {
        self.store.write().await.pop(key);
        Ok(())
    }

    /// Check if a non-expired entry exists for the key.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut store = self.store.write().await;
        match store.get(key) {
            Some(entry) if entry.is_expired() => {
                store.pop(key);
                Ok(false)
            }
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }

    /// Remove every tracked key matching a glob pattern (`*` wildcard).
    /// Returns the number of entries removed. Best-effort: not atomic with
    /// any write that triggered it.
    pub async fn delete_pattern(&self, pattern: &str) -> AppResult<u64> {
        let matcher = glob_to_regex(pattern)?;

        let mut store = self.store.write().await;
        let matching: Vec<String> = store
            .iter()
            .filter(|(key, _)| matcher.is_match(key))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &matching {
            store.pop(key);
        }

        Ok(matching.len() as u64)
    }

    /// Return the cached value, or invoke `factory`, cache its result with
    /// `ttl_seconds` and return it.
    ///
    /// No per-key mutex is held across the factory call: concurrent callers
    /// racing on the same missing key may each invoke the factory. The last
    /// `set` wins, which is safe for read-through use.
    pub async fn get_or_set<T, F, Fut>(
        &self,
        key: &str,
        ttl_seconds: u64,
        factory: F,
    ) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = AppResult<T>>,
    {
        if let Some(value) = self.get(key).await? {
            return Ok(value);
        }

        let value = factory().await?;
        self.set_with_ttl(key, &value, ttl_seconds).await?;
        Ok(value)
    }

    // =========================================================================
    // User Cache Operations
    // =========================================================================

    /// Get cached user by ID.
    pub async fn get_user(&self, user_id: &Uuid) -> AppResult<Option<User>> {
        self.get(&user_id_key(user_id)).await
    }

    /// Cache a user under its id key with the user-data TTL.
    pub async fn set_user(&self, user: &User) -> AppResult<()> {
        self.set_with_ttl(&user_id_key(&user.id), user, CACHE_TTL_MEDIUM_SECONDS)
            .await
    }

    /// Get cached user by email (case-insensitive).
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get(&user_email_key(email)).await
    }

    /// Cache a user under the lower-cased email key.
    pub async fn set_user_by_email(&self, email: &str, user: &User) -> AppResult<()> {
        self.set_with_ttl(&user_email_key(email), user, CACHE_TTL_MEDIUM_SECONDS)
            .await
    }

    /// Invalidate the id and email entries for a user.
    pub async fn invalidate_user(&self, user_id: &Uuid, email: &str) -> AppResult<()> {
        self.delete(&user_id_key(user_id)).await?;
        self.delete(&user_email_key(email)).await
    }

    /// Invalidate every cached entry in an owner's pattern group.
    pub async fn invalidate_owner(&self, owner_id: &Uuid) -> AppResult<u64> {
        self.delete_pattern(&owner_pattern(owner_id)).await
    }

    // =========================================================================
    // Rate Limiting Operations
    // =========================================================================

    /// Check and increment a rate limit counter.
    /// Returns (current_count, is_allowed).
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<(u64, bool)> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut store = self.store.write().await;

        let count = match store.get(&key) {
            Some(entry) if !entry.is_expired() => {
                let count: u64 = entry.json.parse().unwrap_or(0) + 1;
                // Keep the original window expiry
                let entry = CacheEntry {
                    json: count.to_string(),
                    expires_at: entry.expires_at,
                };
                store.put(key, entry);
                count
            }
            _ => {
                // First request in window
                let entry = CacheEntry::new("1".to_string(), Duration::from_secs(window_seconds));
                store.put(key, entry);
                1
            }
        };

        Ok((count, count <= max_requests))
    }
}

/// Cache key for a user-by-id entry.
pub fn user_id_key(user_id: &Uuid) -> String {
    format!("{}{}", CACHE_PREFIX_USER_ID, user_id)
}

/// Cache key for a user-by-email entry; the email is lower-cased so that
/// lookups are case-insensitive.
pub fn user_email_key(email: &str) -> String {
    format!("{}{}", CACHE_PREFIX_USER_EMAIL, email.to_lowercase())
}

/// Convert a `*`-wildcard glob into an anchored regex.
fn glob_to_regex(pattern: &str) -> AppResult<Regex> {
    let escaped = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");

    Regex::new(&format!("^{}$", escaped))
        .map_err(|e| AppError::internal(format!("Invalid cache pattern '{}': {}", pattern, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = Cache::new(16);
        cache.set("k1", &42u32).await.unwrap();

        let value: Option<u32> = cache.get("k1").await.unwrap();
        assert_eq!(value, Some(42));
    }

    #[tokio::test]
    async fn missing_key_is_a_miss() {
        let cache = Cache::new(16);
        let value: Option<String> = cache.get("absent").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn zero_ttl_entry_expires_immediately() {
        let cache = Cache::new(16);
        cache.set_with_ttl("ephemeral", &"v", 0).await.unwrap();

        let value: Option<String> = cache.get("ephemeral").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn overwrite_replaces_existing_entry() {
        let cache = Cache::new(16);
        cache.set("k", &"old").await.unwrap();
        cache.set("k", &"new").await.unwrap();

        let value: Option<String> = cache.get("k").await.unwrap();
        assert_eq!(value.as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let cache = Cache::new(16);
        cache.set("k", &1).await.unwrap();
        cache.delete("k").await.unwrap();
        cache.delete("k").await.unwrap();

        let value: Option<i32> = cache.get("k").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn delete_pattern_removes_matching_keys_only() {
        let cache = Cache::new(16);
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();

        cache
            .set(&format!("owner:{}:sessions", owner), &1)
            .await
            .unwrap();
        cache
            .set(&format!("owner:{}:lifts", owner), &2)
            .await
            .unwrap();
        cache
            .set(&format!("owner:{}:sessions", other), &3)
            .await
            .unwrap();

        let removed = cache.invalidate_owner(&owner).await.unwrap();
        assert_eq!(removed, 2);

        let kept: Option<i32> = cache.get(&format!("owner:{}:sessions", other)).await.unwrap();
        assert_eq!(kept, Some(3));
    }

    #[tokio::test]
    async fn get_or_set_invokes_factory_only_on_miss() {
        let cache = Cache::new(16);

        let value = cache
            .get_or_set("k", 60, || async { Ok(7i32) })
            .await
            .unwrap();
        assert_eq!(value, 7);

        // Second call must come from cache, not the factory
        let value = cache
            .get_or_set("k", 60, || async {
                Err::<i32, _>(AppError::internal("factory should not run"))
            })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn email_key_is_case_insensitive() {
        assert_eq!(
            user_email_key("User@Example.com"),
            user_email_key("user@example.com")
        );
    }

    #[tokio::test]
    async fn rate_limit_counts_within_window() {
        let cache = Cache::new(16);

        let (count, allowed) = cache.check_rate_limit("client", 2, 60).await.unwrap();
        assert_eq!((count, allowed), (1, true));

        let (count, allowed) = cache.check_rate_limit("client", 2, 60).await.unwrap();
        assert_eq!((count, allowed), (2, true));

        let (count, allowed) = cache.check_rate_limit("client", 2, 60).await.unwrap();
        assert_eq!((count, allowed), (3, false));
    }

    #[tokio::test]
    async fn lru_capacity_evicts_oldest() {
        let cache = Cache::new(2);
        cache.set("a", &1).await.unwrap();
        cache.set("b", &2).await.unwrap();
        cache.set("c", &3).await.unwrap();

        let a: Option<i32> = cache.get("a").await.unwrap();
        assert!(a.is_none());
        let c: Option<i32> = cache.get("c").await.unwrap();
        assert_eq!(c, Some(3));
    }
}
