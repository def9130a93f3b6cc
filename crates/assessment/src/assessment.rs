mod store;
mod tiers;

use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde::Serialize;
use site_model::{
    AnalysisService, AssessmentBundle, CoordinatePair, FacilityDescriptor, LiveWeatherSnapshot,
    WeatherService,
};
use thiserror::Error;

pub use crate::store::{AssessmentCache, CACHE_KEY_PREFIX, CacheEntry, DEFAULT_CACHE_VERSION};
pub use crate::tiers::{CachedTier, EmbeddedTier, FreshTier, ResolutionTier};

/// Where an assessment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentOrigin {
    Embedded,
    Cached,
    Fresh,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub analysis: AssessmentBundle,
    pub live: LiveWeatherSnapshot,
    pub origin: AssessmentOrigin,
}

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Site analysis failed at {location}: {message}")]
    Analysis {
        location: CoordinatePair,
        message: String,
    },

    /// Only reachable with a custom tier chain where every tier declines.
    #[error("No assessment source could handle {0}")]
    Unresolved(CoordinatePair),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverState {
    Idle,
    Resolving,
    Ready,
    /// The last resolution failed. The next `resolve` starts over as if idle.
    Failed,
}

pub struct AssessmentRequest<'a> {
    pub location: CoordinatePair,
    pub facility: Option<&'a FacilityDescriptor>,
}

/// Produces assessments from, in order: analysis embedded in the facility
/// record, the facility's cache entry, and a fresh remote computation.
///
/// Only a failed fresh analysis is reported as an error. Weather outages,
/// unreadable embedded analysis and cache trouble all degrade quietly.
pub struct AssessmentResolver {
    tiers: Vec<Box<dyn ResolutionTier>>,
    cache: Arc<AssessmentCache>,
    state: Mutex<ResolverState>,
}

impl AssessmentResolver {
    pub fn new(
        analysis: Arc<dyn AnalysisService>,
        weather: Arc<dyn WeatherService>,
        cache: AssessmentCache,
    ) -> Self {
        let cache = Arc::new(cache);
        let tiers: Vec<Box<dyn ResolutionTier>> = vec![
            Box::new(EmbeddedTier::new(weather.clone())),
            Box::new(CachedTier::new(cache.clone())),
            Box::new(FreshTier::new(analysis, weather, cache.clone())),
        ];
        Self::from_parts(cache, tiers)
    }

    /// A resolver over a custom tier chain, tried in order. The chain must
    /// not be empty.
    pub fn with_tiers(
        cache: Arc<AssessmentCache>,
        tiers: Vec<Box<dyn ResolutionTier>>,
    ) -> Result<Self> {
        anyhow::ensure!(!tiers.is_empty(), "An assessment tier chain needs at least one tier");
        Ok(Self::from_parts(cache, tiers))
    }

    fn from_parts(cache: Arc<AssessmentCache>, tiers: Vec<Box<dyn ResolutionTier>>) -> Self {
        Self {
            tiers,
            cache,
            state: Mutex::new(ResolverState::Idle),
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
            .lock()
            .map(|state| *state)
            .unwrap_or(ResolverState::Idle)
    }

    pub fn cache(&self) -> &AssessmentCache {
        &self.cache
    }

    pub async fn resolve(
        &self,
        location: CoordinatePair,
        facility: Option<&FacilityDescriptor>,
    ) -> Result<Assessment, AssessmentError> {
        self.set_state(ResolverState::Resolving);
        let request = AssessmentRequest { location, facility };

        for tier in &self.tiers {
            if let Some(outcome) = tier.attempt(&request).await {
                log::debug!("Assessment for {} settled by {} tier", location, tier.name());
                return self.settle(outcome);
            }
        }

        self.settle(Err(AssessmentError::Unresolved(location)))
    }

    /// Drops the cache entry for this facility. Embedded analysis and other
    /// facilities are unaffected. Returns whether an entry existed.
    pub fn clear_cache(&self, facility: &FacilityDescriptor) -> Result<bool> {
        match facility.cache_id() {
            Some(facility_id) => self.cache.clear(facility_id),
            None => Ok(false),
        }
    }

    pub fn clear_cache_for_id(&self, facility_id: &str) -> Result<bool> {
        self.cache.clear(facility_id)
    }

    fn settle(&self, outcome: Result<Assessment, AssessmentError>) -> Result<Assessment, AssessmentError> {
        match &outcome {
            Ok(_) => self.set_state(ResolverState::Ready),
            Err(err) => {
                log::warn!("{}", err);
                self.set_state(ResolverState::Failed);
            }
        }
        outcome
    }

    fn set_state(&self, next: ResolverState) {
        if let Ok(mut state) = self.state.lock() {
            *state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::anyhow;
    use async_trait::async_trait;
    use cache::{Cache, MemoryCache};
    use serde_json::json;
    use site_model::{DEFAULT_LIVE_WEATHER, EmbeddedAnalysis};

    use super::*;

    struct FakeAnalysis {
        calls: AtomicUsize,
        fails: bool,
    }

    impl FakeAnalysis {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fails: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fails: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisService for FakeAnalysis {
        async fn analyze_location(&self, lat: f64, lon: f64) -> Result<AssessmentBundle> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fails {
                return Err(anyhow!("Earth Engine quota exhausted"));
            }
            Ok(fresh_bundle(lat, lon))
        }
    }

    struct FakeWeather {
        calls: AtomicUsize,
        snapshot: Option<LiveWeatherSnapshot>,
    }

    impl FakeWeather {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                snapshot: Some(windy()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                snapshot: None,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WeatherService for FakeWeather {
        async fn live_weather(&self, _lat: f64, _lon: f64) -> Result<LiveWeatherSnapshot> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.snapshot.ok_or_else(|| anyhow!("Live weather data fetch failed"))
        }
    }

    /// Accepts reads but refuses every write, like a full browser quota.
    struct FullCache;

    impl Cache for FullCache {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(anyhow!("MDB_MAP_FULL: Environment mapsize limit reached"))
        }

        fn delete(&self, _key: &str) -> Result<bool> {
            Ok(false)
        }
    }

    fn windy() -> LiveWeatherSnapshot {
        LiveWeatherSnapshot {
            wind_speed_120m: 8.2,
            humidity: 54.0,
            ..DEFAULT_LIVE_WEATHER
        }
    }

    fn fresh_bundle(lat: f64, lon: f64) -> AssessmentBundle {
        serde_json::from_value(json!({
            "wind": {"score": 35.0, "rating": "MODERATE"},
            "solar": {"score": 66.0, "rating": "GOOD"},
            "water": {"composite_risk_score": 48.0},
            "suitability": {"overall_score": 50.0, "rating": "VIABLE"},
            "location": {"lat": lat, "lon": lon},
            "timestamp": "2024-05-01T10:00:00"
        }))
        .unwrap()
    }

    fn embedded_json() -> serde_json::Value {
        json!({
            "wind": {"score": 12.5, "grade": "D"},
            "solar": {"score": 91.0, "rating": "WORLD-CLASS"},
            "water": {"composite_risk_score": 20.0},
            "suitability": {"overall_score": 77.0, "rating": "PREMIUM SITE"},
            "location": {"lat": 26.91, "lon": 70.91},
            "timestamp": "2024-01-15T08:30:00"
        })
    }

    fn chennai() -> CoordinatePair {
        CoordinatePair::new(13.0827, 80.2707)
    }

    fn facility(id: &str) -> FacilityDescriptor {
        FacilityDescriptor::new("STT Chennai DC 1", "STT GDC India").with_id(id)
    }

    fn resolver(
        analysis: Arc<FakeAnalysis>,
        weather: Arc<FakeWeather>,
        store: Arc<dyn Cache>,
    ) -> AssessmentResolver {
        AssessmentResolver::new(analysis, weather, AssessmentCache::new(store))
    }

    #[tokio::test]
    async fn test_embedded_analysis_skips_remote_analysis() {
        let (analysis, weather) = (FakeAnalysis::ok(), FakeWeather::ok());
        let store = Arc::new(MemoryCache::new());
        let resolver = resolver(analysis.clone(), weather.clone(), store.clone());
        let facility = facility("f1").with_analysis(EmbeddedAnalysis::Structured(embedded_json()));

        let assessment = resolver.resolve(chennai(), Some(&facility)).await.unwrap();
        let expected: AssessmentBundle = serde_json::from_value(embedded_json()).unwrap();

        assert_eq!(analysis.calls(), 0);
        assert_eq!(weather.calls(), 1);
        assert_eq!(assessment.origin, AssessmentOrigin::Embedded);
        assert_eq!(assessment.analysis.solar, expected.solar);
        assert_eq!(assessment.analysis.wind, expected.wind);
        assert_eq!(assessment.analysis.water, expected.water);
        assert_eq!(assessment.live, windy());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_serialized_embedded_analysis() {
        let (analysis, weather) = (FakeAnalysis::ok(), FakeWeather::failing());
        let resolver = resolver(analysis.clone(), weather, Arc::new(MemoryCache::new()));
        let facility = facility("f1")
            .with_analysis(EmbeddedAnalysis::Serialized(embedded_json().to_string()));

        let assessment = resolver.resolve(chennai(), Some(&facility)).await.unwrap();

        assert_eq!(analysis.calls(), 0);
        assert_eq!(assessment.origin, AssessmentOrigin::Embedded);
        assert_eq!(assessment.live, DEFAULT_LIVE_WEATHER);
    }

    #[tokio::test]
    async fn test_unreadable_embedded_analysis_falls_through() {
        let (analysis, weather) = (FakeAnalysis::ok(), FakeWeather::ok());
        let resolver = resolver(analysis.clone(), weather, Arc::new(MemoryCache::new()));
        let facility = facility("f1").with_analysis(EmbeddedAnalysis::Serialized("{oops".into()));

        let assessment = resolver.resolve(chennai(), Some(&facility)).await.unwrap();

        assert_eq!(analysis.calls(), 1);
        assert_eq!(assessment.origin, AssessmentOrigin::Fresh);
    }

    #[tokio::test]
    async fn test_cache_hit_makes_no_remote_calls() {
        let (analysis, weather) = (FakeAnalysis::ok(), FakeWeather::ok());
        let store = Arc::new(MemoryCache::new());
        let cached_live = LiveWeatherSnapshot {
            wind_speed_80m: 3.3,
            ..DEFAULT_LIVE_WEATHER
        };
        AssessmentCache::new(store.clone()).write("f1", &fresh_bundle(1.0, 2.0), &cached_live);

        let resolver = resolver(analysis.clone(), weather.clone(), store);
        let assessment = resolver.resolve(chennai(), Some(&facility("f1"))).await.unwrap();

        assert_eq!(analysis.calls(), 0);
        assert_eq!(weather.calls(), 0);
        assert_eq!(assessment.origin, AssessmentOrigin::Cached);
        assert_eq!(assessment.live, cached_live);
        assert_eq!(assessment.analysis, fresh_bundle(1.0, 2.0));
    }

    #[tokio::test]
    async fn test_weather_failure_uses_default_snapshot() {
        let (analysis, weather) = (FakeAnalysis::ok(), FakeWeather::failing());
        let store = Arc::new(MemoryCache::new());
        let resolver = resolver(analysis.clone(), weather.clone(), store.clone());

        let assessment = resolver.resolve(chennai(), Some(&facility("f1"))).await.unwrap();

        assert_eq!(assessment.origin, AssessmentOrigin::Fresh);
        assert_eq!(assessment.live, DEFAULT_LIVE_WEATHER);
        assert_eq!(weather.calls(), 1);
        assert_eq!(resolver.state(), ResolverState::Ready);

        let cached = resolver.cache().read("f1").unwrap();
        assert_eq!(cached.live, DEFAULT_LIVE_WEATHER);
    }

    #[tokio::test]
    async fn test_analysis_failure_is_fatal_and_uncached() {
        let (analysis, weather) = (FakeAnalysis::failing(), FakeWeather::ok());
        let store = Arc::new(MemoryCache::new());
        let resolver = resolver(analysis.clone(), weather.clone(), store.clone());

        let err = resolver
            .resolve(chennai(), Some(&facility("f1")))
            .await
            .unwrap_err();

        assert!(matches!(err, AssessmentError::Analysis { .. }));
        assert!(err.to_string().contains("quota exhausted"));
        assert_eq!(weather.calls(), 1);
        assert!(store.is_empty());
        assert_eq!(resolver.state(), ResolverState::Failed);
    }

    #[tokio::test]
    async fn test_failed_state_recovers_on_next_resolution() {
        let resolver = AssessmentResolver::new(
            FakeAnalysis::failing(),
            FakeWeather::ok(),
            AssessmentCache::new(Arc::new(MemoryCache::new())),
        );
        assert_eq!(resolver.state(), ResolverState::Idle);

        resolver.resolve(chennai(), None).await.unwrap_err();
        assert_eq!(resolver.state(), ResolverState::Failed);

        let embedded = facility("f1").with_analysis(EmbeddedAnalysis::Structured(embedded_json()));
        resolver.resolve(chennai(), Some(&embedded)).await.unwrap();
        assert_eq!(resolver.state(), ResolverState::Ready);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_fresh_and_spares_other_facilities() {
        let (analysis, weather) = (FakeAnalysis::ok(), FakeWeather::ok());
        let store = Arc::new(MemoryCache::new());
        let resolver = resolver(analysis.clone(), weather, store.clone());
        let (f1, f2) = (facility("f1"), facility("f2"));

        resolver.resolve(chennai(), Some(&f1)).await.unwrap();
        resolver.resolve(chennai(), Some(&f2)).await.unwrap();
        assert_eq!(analysis.calls(), 2);
        assert_eq!(store.len(), 2);

        assert!(resolver.clear_cache(&f1).unwrap());
        assert_eq!(store.len(), 1);

        let again = resolver.resolve(chennai(), Some(&f1)).await.unwrap();
        assert_eq!(again.origin, AssessmentOrigin::Fresh);
        assert_eq!(analysis.calls(), 3);

        let other = resolver.resolve(chennai(), Some(&f2)).await.unwrap();
        assert_eq!(other.origin, AssessmentOrigin::Cached);
        assert_eq!(analysis.calls(), 3);
    }

    #[tokio::test]
    async fn test_clear_cache_leaves_embedded_analysis_alone() {
        let resolver = resolver(FakeAnalysis::ok(), FakeWeather::ok(), Arc::new(MemoryCache::new()));
        let facility = facility("f1").with_analysis(EmbeddedAnalysis::Structured(embedded_json()));

        assert!(!resolver.clear_cache(&facility).unwrap());
        let assessment = resolver.resolve(chennai(), Some(&facility)).await.unwrap();
        assert_eq!(assessment.origin, AssessmentOrigin::Embedded);
    }

    #[tokio::test]
    async fn test_cached_resolution_is_byte_identical() {
        let resolver = resolver(FakeAnalysis::ok(), FakeWeather::ok(), Arc::new(MemoryCache::new()));
        let facility = facility("f1");
        resolver.resolve(chennai(), Some(&facility)).await.unwrap();

        let first = resolver.resolve(chennai(), Some(&facility)).await.unwrap();
        let second = resolver.resolve(chennai(), Some(&facility)).await.unwrap();

        assert_eq!(first.origin, AssessmentOrigin::Cached);
        assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_replaced() {
        let (analysis, weather) = (FakeAnalysis::ok(), FakeWeather::ok());
        let store = Arc::new(MemoryCache::new());
        store.set("dc_analysis_v1_f1", "not json at all").unwrap();
        let resolver = resolver(analysis.clone(), weather, store.clone());

        let assessment = resolver.resolve(chennai(), Some(&facility("f1"))).await.unwrap();

        assert_eq!(assessment.origin, AssessmentOrigin::Fresh);
        assert_eq!(analysis.calls(), 1);
        let raw = store.get("dc_analysis_v1_f1").unwrap().unwrap();
        assert!(serde_json::from_str::<CacheEntry>(&raw).is_ok());
    }

    #[tokio::test]
    async fn test_cache_write_failure_is_swallowed() {
        let resolver = resolver(FakeAnalysis::ok(), FakeWeather::ok(), Arc::new(FullCache));

        let assessment = resolver.resolve(chennai(), Some(&facility("f1"))).await.unwrap();
        assert_eq!(assessment.origin, AssessmentOrigin::Fresh);
    }

    #[tokio::test]
    async fn test_without_facility_id_nothing_is_cached() {
        let (analysis, weather) = (FakeAnalysis::ok(), FakeWeather::ok());
        let store = Arc::new(MemoryCache::new());
        let resolver = resolver(analysis.clone(), weather, store.clone());
        let anonymous = FacilityDescriptor::new("Unlisted site", "");

        resolver.resolve(chennai(), Some(&anonymous)).await.unwrap();
        resolver.resolve(chennai(), None).await.unwrap();

        assert_eq!(analysis.calls(), 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_fresh_analysis_uses_requested_point() {
        let resolver = resolver(FakeAnalysis::ok(), FakeWeather::ok(), Arc::new(MemoryCache::new()));
        let point = CoordinatePair::new(26.9157, 70.9083);

        let assessment = resolver.resolve(point, None).await.unwrap();
        assert_eq!(assessment.analysis.location, point);
    }

    #[test]
    fn test_empty_tier_chain_is_rejected() {
        let cache = Arc::new(AssessmentCache::new(Arc::new(MemoryCache::new())));

        assert!(AssessmentResolver::with_tiers(cache, Vec::new()).is_err());
    }

    #[tokio::test]
    async fn test_declining_custom_chain_is_unresolved() {
        let cache = Arc::new(AssessmentCache::new(Arc::new(MemoryCache::new())));
        let tiers: Vec<Box<dyn ResolutionTier>> = vec![Box::new(CachedTier::new(cache.clone()))];
        let resolver = AssessmentResolver::with_tiers(cache, tiers).unwrap();

        let err = resolver.resolve(chennai(), None).await.unwrap_err();
        assert!(matches!(err, AssessmentError::Unresolved(_)));
        assert_eq!(resolver.state(), ResolverState::Failed);
    }
}
