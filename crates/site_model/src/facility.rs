use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{AssessmentBundle, CoordinatePair};

/// A facility as shipped by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, alias = "lng", skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<EmbeddedAnalysis>,
}

/// Analysis precomputed at ingestion time, either inline or as a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddedAnalysis {
    Serialized(String),
    Structured(Value),
}

impl EmbeddedAnalysis {
    pub fn parse(&self) -> serde_json::Result<AssessmentBundle> {
        match self {
            EmbeddedAnalysis::Serialized(raw) => AssessmentBundle::from_json_str(raw),
            EmbeddedAnalysis::Structured(value) => serde_json::from_value(value.clone()),
        }
    }
}

impl FacilityDescriptor {
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            company: company.into(),
            city: None,
            state: None,
            lat: None,
            lon: None,
            analysis: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_place(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }

    pub fn with_location(mut self, location: CoordinatePair) -> Self {
        self.lat = Some(location.lat);
        self.lon = Some(location.lon);
        self
    }

    pub fn with_analysis(mut self, analysis: EmbeddedAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Coordinates recorded on the facility itself, if both are present and sane.
    pub fn location(&self) -> Option<CoordinatePair> {
        let pair = CoordinatePair::new(self.lat?, self.lon?);
        pair.is_valid().then_some(pair)
    }

    /// The id used to key cached assessments. Blank ids do not count.
    pub fn cache_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}
