mod bundle;
pub mod fallback;
mod facility;
mod location;
mod weather;

use anyhow::Result;
use async_trait::async_trait;

pub use crate::bundle::{AssessmentBundle, SolarData, SuitabilityData, WaterData, WindData};
pub use crate::facility::{EmbeddedAnalysis, FacilityDescriptor};
pub use crate::location::{CoordinatePair, LocationDescriptor};
pub use crate::weather::{DEFAULT_LIVE_WEATHER, LiveWeatherSnapshot};

/// Remote site analysis. A failure here is fatal to an assessment.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze_location(&self, lat: f64, lon: f64) -> Result<AssessmentBundle>;
}

/// Remote live weather. Callers substitute [`DEFAULT_LIVE_WEATHER`] on failure.
#[async_trait]
pub trait WeatherService: Send + Sync {
    async fn live_weather(&self, lat: f64, lon: f64) -> Result<LiveWeatherSnapshot>;
}
