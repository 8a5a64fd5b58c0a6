//! Caching layer for journey searches.
//!
//! The timetable never changes while the server runs, so a search result
//! for a given (start, end, time) stays valid until evicted. Failed
//! searches are cached too; repeated "no journey" queries are as common as
//! successful ones.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::{Journey, Station, Time};
use crate::planner::find_journey;
use crate::timetable::Timetable;

/// Cache key for searches: (start, end, minimum departure time).
type SearchKey = (Station, Station, Time);

/// Cached search result. `None` means no journey exists.
type SearchEntry = Arc<Option<Journey>>;

/// Configuration for the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
        }
    }
}

/// Cache of journey search results.
pub struct JourneyCache {
    searches: MokaCache<SearchKey, SearchEntry>,
}

impl JourneyCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let searches = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { searches }
    }

    /// Get a cached search result.
    pub async fn get(&self, key: &SearchKey) -> Option<SearchEntry> {
        self.searches.get(key).await
    }

    /// Insert a search result into the cache.
    pub async fn insert(&self, key: SearchKey, entry: SearchEntry) {
        self.searches.insert(key, entry).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.searches.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.searches.invalidate_all();
    }
}

/// Journey search with caching.
///
/// Wraps a shared timetable and caches [`find_journey`] results.
pub struct CachedFinder {
    timetable: Arc<Timetable>,
    cache: JourneyCache,
}

impl CachedFinder {
    /// Create a new cached finder.
    pub fn new(timetable: Arc<Timetable>, cache_config: &CacheConfig) -> Self {
        Self {
            timetable,
            cache: JourneyCache::new(cache_config),
        }
    }

    /// Find the earliest-arriving journey, using the cache if available.
    pub async fn find(&self, start: &Station, end: &Station, min_depart: Time) -> SearchEntry {
        let key = (start.clone(), end.clone(), min_depart);

        if let Some(cached) = self.cache.get(&key).await {
            trace!(%start, %end, min_depart, "search cache hit");
            return cached;
        }

        let entry = Arc::new(find_journey(start, end, min_depart, &self.timetable));
        self.cache.insert(key, entry.clone()).await;
        entry
    }

    /// Access the timetable, for lookups that bypass the cache.
    pub fn timetable(&self) -> &Arc<Timetable> {
        &self.timetable
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::parse_timetable;

    fn st(name: &str) -> Station {
        Station::new(name).unwrap()
    }

    fn finder() -> CachedFinder {
        let timetable = parse_timetable("R1\nA, B, C\n0 10 20\n5 15 25\n\n").unwrap();
        CachedFinder::new(Arc::new(timetable), &CacheConfig::default())
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_capacity, 1000);
    }

    #[test]
    fn cache_creation() {
        let cache = JourneyCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }

    #[tokio::test]
    async fn cached_result_matches_search() {
        let finder = finder();

        let first = finder.find(&st("A"), &st("C"), 3).await;
        let second = finder.find(&st("A"), &st("C"), 3).await;

        assert!(Arc::ptr_eq(&first, &second));
        let journey = first.as_ref().as_ref().unwrap();
        assert_eq!(journey.end_time(), 25);
    }

    #[tokio::test]
    async fn keys_include_time() {
        let finder = finder();

        let early = finder.find(&st("A"), &st("C"), 0).await;
        let late = finder.find(&st("A"), &st("C"), 3).await;

        assert_eq!(early.as_ref().as_ref().map(Journey::end_time), Some(20));
        assert_eq!(late.as_ref().as_ref().map(Journey::end_time), Some(25));
    }

    #[tokio::test]
    async fn not_found_is_cached() {
        let finder = finder();

        let first = finder.find(&st("C"), &st("A"), 0).await;
        let second = finder.find(&st("C"), &st("A"), 0).await;

        assert!(first.is_none());
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn entry_count_tracks_distinct_searches() {
        let finder = finder();
        assert_eq!(finder.cache_entry_count(), 0);

        finder.find(&st("A"), &st("C"), 0).await;
        finder.find(&st("A"), &st("C"), 0).await;
        finder.find(&st("C"), &st("A"), 0).await;
        finder.cache.searches.run_pending_tasks().await;

        assert_eq!(finder.cache_entry_count(), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_new_search() {
        let finder = finder();

        let first = finder.find(&st("A"), &st("B"), 0).await;
        finder.invalidate_cache();
        let second = finder.find(&st("A"), &st("B"), 0).await;

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first, second);
    }
}
