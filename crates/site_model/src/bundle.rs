//! The merged solar/wind/water/suitability result for one point.
//!
//! Scoring happens upstream, so each section only names the headline fields
//! this side reads and carries everything else through untouched in
//! `details`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::CoordinatePair;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentBundle {
    #[serde(default, deserialize_with = "null_as_default")]
    pub wind: WindData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub solar: SolarData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub water: WaterData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suitability: SuitabilityData,
    pub location: CoordinatePair,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolarData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_risk_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl AssessmentBundle {
    /// An empty bundle for `location`: every section present but blank.
    pub fn empty(location: CoordinatePair, timestamp: impl Into<String>) -> Self {
        Self {
            wind: WindData::default(),
            solar: SolarData::default(),
            water: WaterData::default(),
            suitability: SuitabilityData::default(),
            location,
            timestamp: timestamp.into(),
            source: None,
        }
    }

    pub fn from_json_str(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
