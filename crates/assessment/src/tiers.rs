//! The resolution tiers, in the order the resolver tries them by default.
//!
//! A tier returns `None` when it does not apply or could not produce a
//! result, letting the next tier try. `Some` ends the chain either way.

use std::sync::Arc;

use async_trait::async_trait;
use site_model::{
    AnalysisService, CoordinatePair, DEFAULT_LIVE_WEATHER, LiveWeatherSnapshot, WeatherService,
};

use crate::{Assessment, AssessmentError, AssessmentOrigin, AssessmentRequest, store::AssessmentCache};

#[async_trait]
pub trait ResolutionTier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(
        &self,
        request: &AssessmentRequest<'_>,
    ) -> Option<Result<Assessment, AssessmentError>>;
}

pub(crate) async fn live_weather_or_default(
    weather: &dyn WeatherService,
    location: CoordinatePair,
) -> LiveWeatherSnapshot {
    match weather.live_weather(location.lat, location.lon).await {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::warn!("Live weather unavailable at {}: {}", location, err);
            DEFAULT_LIVE_WEATHER
        }
    }
}

/// Analysis shipped inline with the facility record. Weather is fetched
/// fresh and nothing is cached.
pub struct EmbeddedTier {
    weather: Arc<dyn WeatherService>,
}

impl EmbeddedTier {
    pub fn new(weather: Arc<dyn WeatherService>) -> Self {
        Self { weather }
    }
}

#[async_trait]
impl ResolutionTier for EmbeddedTier {
    fn name(&self) -> &'static str {
        "embedded"
    }

    async fn attempt(
        &self,
        request: &AssessmentRequest<'_>,
    ) -> Option<Result<Assessment, AssessmentError>> {
        let facility = request.facility?;
        let embedded = facility.analysis.as_ref()?;

        let analysis = match embedded.parse() {
            Ok(analysis) => analysis,
            Err(err) => {
                log::debug!("Ignoring unreadable embedded analysis for {}: {}", facility.name, err);
                return None;
            }
        };

        let live = live_weather_or_default(self.weather.as_ref(), request.location).await;

        Some(Ok(Assessment {
            analysis,
            live,
            origin: AssessmentOrigin::Embedded,
        }))
    }
}

/// A previously stored result for the facility id. No remote calls; the
/// cached weather is served as-is.
pub struct CachedTier {
    cache: Arc<AssessmentCache>,
}

impl CachedTier {
    pub fn new(cache: Arc<AssessmentCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl ResolutionTier for CachedTier {
    fn name(&self) -> &'static str {
        "cached"
    }

    async fn attempt(
        &self,
        request: &AssessmentRequest<'_>,
    ) -> Option<Result<Assessment, AssessmentError>> {
        let facility_id = request.facility?.cache_id()?;
        let entry = self.cache.read(facility_id)?;

        Some(Ok(Assessment {
            analysis: entry.analysis,
            live: entry.live,
            origin: AssessmentOrigin::Cached,
        }))
    }
}

/// Analysis and weather requested together; both settle before the result is
/// decided. Only the analysis is required.
pub struct FreshTier {
    analysis: Arc<dyn AnalysisService>,
    weather: Arc<dyn WeatherService>,
    cache: Arc<AssessmentCache>,
}

impl FreshTier {
    pub fn new(
        analysis: Arc<dyn AnalysisService>,
        weather: Arc<dyn WeatherService>,
        cache: Arc<AssessmentCache>,
    ) -> Self {
        Self {
            analysis,
            weather,
            cache,
        }
    }
}

#[async_trait]
impl ResolutionTier for FreshTier {
    fn name(&self) -> &'static str {
        "fresh"
    }

    async fn attempt(
        &self,
        request: &AssessmentRequest<'_>,
    ) -> Option<Result<Assessment, AssessmentError>> {
        let CoordinatePair { lat, lon } = request.location;

        let (analysis, live) = futures::join!(
            self.analysis.analyze_location(lat, lon),
            self.weather.live_weather(lat, lon),
        );

        let analysis = match analysis {
            Ok(analysis) => analysis,
            Err(err) => {
                return Some(Err(AssessmentError::Analysis {
                    location: request.location,
                    message: err.to_string(),
                }));
            }
        };

        let live = live.unwrap_or_else(|err| {
            log::warn!("Live weather unavailable at {}: {}", request.location, err);
            DEFAULT_LIVE_WEATHER
        });

        if let Some(facility_id) = request.facility.and_then(|facility| facility.cache_id()) {
            self.cache.write(facility_id, &analysis, &live);
        }

        Some(Ok(Assessment {
            analysis,
            live,
            origin: AssessmentOrigin::Fresh,
        }))
    }
}
