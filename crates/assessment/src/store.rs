use std::{sync::Arc, time::Duration};

use anyhow::Result;
use cache::Cache;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use site_model::{AssessmentBundle, LiveWeatherSnapshot};

pub const CACHE_KEY_PREFIX: &str = "dc_analysis";
pub const DEFAULT_CACHE_VERSION: &str = "v1";

/// What gets persisted per facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub analysis: AssessmentBundle,
    pub live: LiveWeatherSnapshot,
    pub cached_at: DateTime<Utc>,
}

/// Versioned, facility-keyed view over a [`Cache`].
///
/// Every failure in here degrades to a miss: a corrupt or expired entry is
/// deleted, a failed write is logged and dropped.
pub struct AssessmentCache {
    store: Arc<dyn Cache>,
    version: String,
    max_age: Option<chrono::Duration>,
}

impl AssessmentCache {
    pub fn new(store: Arc<dyn Cache>) -> Self {
        Self {
            store,
            version: DEFAULT_CACHE_VERSION.to_string(),
            max_age: None,
        }
    }

    /// Bumping the version orphans every entry written under the old one.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Entries older than `max_age` are treated as absent. `None` keeps
    /// entries forever.
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age.and_then(|age| chrono::Duration::from_std(age).ok());
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn key(&self, facility_id: &str) -> String {
        format!("{}_{}_{}", CACHE_KEY_PREFIX, self.version, facility_id)
    }

    pub fn read(&self, facility_id: &str) -> Option<CacheEntry> {
        let key = self.key(facility_id);

        let raw = match self.store.get(&key) {
            Ok(raw) => raw?,
            Err(err) => {
                log::warn!("Failed to read cache entry {}: {}", key, err);
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Discarding corrupt cache entry {}: {}", key, err);
                self.discard(&key);
                return None;
            }
        };

        if let Some(max_age) = self.max_age {
            if Utc::now() - entry.cached_at > max_age {
                log::debug!("Cache entry {} expired (cached at {})", key, entry.cached_at);
                self.discard(&key);
                return None;
            }
        }

        Some(entry)
    }

    /// Returns whether the entry was stored.
    pub fn write(&self, facility_id: &str, analysis: &AssessmentBundle, live: &LiveWeatherSnapshot) -> bool {
        let key = self.key(facility_id);
        let entry = CacheEntry {
            analysis: analysis.clone(),
            live: *live,
            cached_at: Utc::now(),
        };

        let stored = serde_json::to_string(&entry)
            .map_err(anyhow::Error::from)
            .and_then(|raw| self.store.set(&key, &raw));

        match stored {
            Ok(()) => true,
            Err(err) => {
                log::warn!("Failed to store cache entry {}: {}", key, err);
                false
            }
        }
    }

    pub fn clear(&self, facility_id: &str) -> Result<bool> {
        let key = self.key(facility_id);
        let removed = self.store.delete(&key)?;
        log::debug!("Cleared cache entry {} (present: {})", key, removed);
        Ok(removed)
    }

    fn discard(&self, key: &str) {
        if let Err(err) = self.store.delete(key) {
            log::warn!("Failed to delete cache entry {}: {}", key, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use cache::MemoryCache;
    use site_model::{CoordinatePair, DEFAULT_LIVE_WEATHER};

    use super::*;

    fn bundle() -> AssessmentBundle {
        AssessmentBundle::empty(CoordinatePair::new(13.08, 80.27), "2024-05-01T10:00:00")
    }

    #[test]
    fn test_key_format() {
        let cache = AssessmentCache::new(Arc::new(MemoryCache::new())).with_version("v7");
        assert_eq!(cache.key("stt-pune-dc-2"), "dc_analysis_v7_stt-pune-dc-2");
    }

    #[test]
    fn test_write_then_read() {
        let cache = AssessmentCache::new(Arc::new(MemoryCache::new()));
        assert!(cache.write("f1", &bundle(), &DEFAULT_LIVE_WEATHER));

        let entry = cache.read("f1").unwrap();
        assert_eq!(entry.analysis, bundle());
        assert!(entry.live.is_default());
        assert!(cache.read("f2").is_none());
    }

    #[test]
    fn test_entry_uses_camel_case_cached_at() {
        let store = Arc::new(MemoryCache::new());
        let cache = AssessmentCache::new(store.clone());
        cache.write("f1", &bundle(), &DEFAULT_LIVE_WEATHER);

        let raw = store.get("dc_analysis_v1_f1").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.get("cachedAt").is_some());
        assert!(value.get("analysis").is_some());
        assert!(value.get("live").is_some());
    }

    #[test]
    fn test_corrupt_entry_is_deleted() {
        let store = Arc::new(MemoryCache::new());
        store.set("dc_analysis_v1_f1", "{\"analysis\": ").unwrap();

        let cache = AssessmentCache::new(store.clone());
        assert!(cache.read("f1").is_none());
        assert!(store.get("dc_analysis_v1_f1").unwrap().is_none());
    }

    #[test]
    fn test_version_bump_hides_old_entries() {
        let store = Arc::new(MemoryCache::new());
        AssessmentCache::new(store.clone()).write("f1", &bundle(), &DEFAULT_LIVE_WEATHER);

        let bumped = AssessmentCache::new(store.clone()).with_version("v2");
        assert!(bumped.read("f1").is_none());
        assert!(AssessmentCache::new(store).read("f1").is_some());
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let store = Arc::new(MemoryCache::new());
        let stale = CacheEntry {
            analysis: bundle(),
            live: DEFAULT_LIVE_WEATHER,
            cached_at: Utc::now() - chrono::Duration::hours(2),
        };
        store
            .set("dc_analysis_v1_f1", &serde_json::to_string(&stale).unwrap())
            .unwrap();

        let unbounded = AssessmentCache::new(store.clone());
        assert!(unbounded.read("f1").is_some());

        let bounded = AssessmentCache::new(store.clone()).with_max_age(Some(Duration::from_secs(3600)));
        assert!(bounded.read("f1").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_only_touches_one_facility() {
        let cache = AssessmentCache::new(Arc::new(MemoryCache::new()));
        cache.write("f1", &bundle(), &DEFAULT_LIVE_WEATHER);
        cache.write("f2", &bundle(), &DEFAULT_LIVE_WEATHER);

        assert!(cache.clear("f1").unwrap());
        assert!(!cache.clear("f1").unwrap());
        assert!(cache.read("f1").is_none());
        assert!(cache.read("f2").is_some());
    }
}
