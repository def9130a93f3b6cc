use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::{Result, anyhow};
use assessment::{AssessmentCache, AssessmentResolver};
use async_trait::async_trait;
use cache::MemoryCache;
use rmcp::model::Content;
use site_model::{
    AnalysisService, AssessmentBundle, CoordinatePair, LiveWeatherSnapshot, WeatherService,
};

/// Analysis backend that echoes the requested point, or always fails.
#[derive(Default)]
pub(crate) struct FakeBackend {
    pub(crate) fail_analysis: bool,
    pub(crate) fail_weather: bool,
    pub(crate) analysis_calls: AtomicUsize,
    pub(crate) weather_calls: AtomicUsize,
}

impl FakeBackend {
    pub(crate) fn failing_weather() -> Self {
        Self {
            fail_weather: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_analysis() -> Self {
        Self {
            fail_analysis: true,
            ..Self::default()
        }
    }

    pub(crate) fn analysis_calls(&self) -> usize {
        self.analysis_calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn bundle_at(location: CoordinatePair) -> AssessmentBundle {
    let mut bundle = AssessmentBundle::empty(location, "2024-05-01T10:00:00");
    bundle.wind.score = Some(42.0);
    bundle.wind.rating = Some("Fair".into());
    bundle.solar.score = Some(81.5);
    bundle.solar.rating = Some("Excellent".into());
    bundle.water.composite_risk_score = Some(30.0);
    bundle.water.rating = Some("Low Risk".into());
    bundle.suitability.overall_score = Some(68.0);
    bundle.suitability.rating = Some("Good".into());
    bundle.suitability.insights = vec!["Strong solar resource".into()];
    bundle
}

pub(crate) fn windy() -> LiveWeatherSnapshot {
    LiveWeatherSnapshot {
        wind_speed_120m: 7.5,
        temperature_120m: 24.0,
        ..LiveWeatherSnapshot::default()
    }
}

#[async_trait]
impl AnalysisService for FakeBackend {
    async fn analyze_location(&self, lat: f64, lon: f64) -> Result<AssessmentBundle> {
        self.analysis_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_analysis {
            return Err(anyhow!("HTTP error 500 Internal Server Error: boom"));
        }
        Ok(bundle_at(CoordinatePair::new(lat, lon)))
    }
}

#[async_trait]
impl WeatherService for FakeBackend {
    async fn live_weather(&self, _lat: f64, _lon: f64) -> Result<LiveWeatherSnapshot> {
        self.weather_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_weather {
            return Err(anyhow!("connection refused"));
        }
        Ok(windy())
    }
}

pub(crate) fn resolver(backend: Arc<FakeBackend>) -> Arc<AssessmentResolver> {
    let cache = AssessmentCache::new(Arc::new(MemoryCache::new()));
    Arc::new(AssessmentResolver::new(backend.clone(), backend, cache))
}

pub(crate) fn first_text(content: &[Content]) -> &str {
    content
        .first()
        .and_then(|content| content.as_text())
        .map(|text| text.text.as_str())
        .unwrap_or_default()
}
