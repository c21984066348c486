use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::models::{ScoredBenefit, UserProfile};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// In-memory cache of final recommendation lists
///
/// Entries expire after the configured TTL. The cache is owned by the
/// application state and shared across workers.
pub struct RecommendationCache {
    entries: moka::future::Cache<String, Arc<Vec<ScoredBenefit>>>,
}

impl RecommendationCache {
    /// Create a new cache
    pub fn new(capacity: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { entries }
    }

    pub async fn get(&self, key: &str) -> Option<Arc<Vec<ScoredBenefit>>> {
        let hit = self.entries.get(key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        } else {
            tracing::trace!("Cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, key: String, benefits: Vec<ScoredBenefit>) -> Arc<Vec<ScoredBenefit>> {
        let benefits = Arc::new(benefits);
        self.entries.insert(key, Arc::clone(&benefits)).await;
        benefits
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a profile's recommendations
    ///
    /// Interests are a sorted set, so equal profiles share a key regardless
    /// of the order the interests were submitted in.
    pub fn recommendation(profile: &UserProfile) -> Result<String, CacheError> {
        Ok(format!("recommend:{}", serde_json::to_string(profile)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeBracket, Category};

    #[tokio::test]
    async fn test_cache_insert_get() {
        let cache = RecommendationCache::new(100, 60);

        assert!(cache.get("missing").await.is_none());

        cache.insert("key".to_string(), vec![]).await;
        let hit = cache.get("key").await.unwrap();
        assert!(hit.is_empty());
    }

    #[tokio::test]
    async fn test_cache_hit_shares_inserted_list() {
        let cache = RecommendationCache::new(100, 60);

        let stored = cache.insert("key".to_string(), vec![]).await;
        let hit = cache.get("key").await.unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));

        // Entries are keyed exactly
        assert!(cache.get("key ").await.is_none());
    }

    #[test]
    fn test_cache_key_ignores_interest_order() {
        let a = UserProfile {
            age: Some(AgeBracket::Twenties),
            interests: [Category::Housing, Category::CultureLeisure].into_iter().collect(),
            ..Default::default()
        };
        let b = UserProfile {
            interests: [Category::CultureLeisure, Category::Housing].into_iter().collect(),
            ..a.clone()
        };

        let key = CacheKey::recommendation(&a).unwrap();
        assert_eq!(key, CacheKey::recommendation(&b).unwrap());
        assert!(key.starts_with("recommend:"));
        assert!(key.contains("20대"));
    }
}
