use std::sync::Arc;

use anyhow::{Result, anyhow};
use assessment::{Assessment, AssessmentOrigin, AssessmentResolver};
use async_trait::async_trait;
use coordinates::{CoordinateResolver, Precision, ResolvedCoordinate};
use rmcp::model::{Content, Tool};
use serde_json::{Value, json};
use site_model::{CoordinatePair, FacilityDescriptor};

use crate::{
    FacilityRegistry, ToolExecutor,
    resolve_coordinates::ResolveCoordinatesTool,
    utils::{explicit_location, optional_str, score, text, tool},
};

pub struct AssessSiteTool {
    assessments: Arc<AssessmentResolver>,
    coordinates: Arc<CoordinateResolver>,
    facilities: Arc<FacilityRegistry>,
    strict_precision: bool,
}

impl AssessSiteTool {
    pub fn new(
        assessments: Arc<AssessmentResolver>,
        coordinates: Arc<CoordinateResolver>,
        facilities: Arc<FacilityRegistry>,
    ) -> Self {
        Self {
            assessments,
            coordinates,
            facilities,
            strict_precision: false,
        }
    }

    /// Refuse to assess points that are only known to state-centroid precision.
    pub fn with_strict_precision(mut self, strict_precision: bool) -> Self {
        self.strict_precision = strict_precision;
        self
    }

    /// Picks the point to assess and the facility record, if any, to key it by.
    fn target(&self, args: &Value) -> Result<(ResolvedCoordinate, Option<FacilityDescriptor>)> {
        let explicit = explicit_location(args)?;
        let facility_id = optional_str(args, "facility_id");
        let facility = facility_id.and_then(|id| self.facilities.get(id)).cloned();

        if let Some(location) = explicit {
            let facility = match (facility, facility_id) {
                (Some(facility), _) => Some(facility),
                (None, Some(id)) => Some(
                    FacilityDescriptor::new(id, "")
                        .with_id(id)
                        .with_location(location),
                ),
                (None, None) => None,
            };
            let resolved = ResolvedCoordinate {
                location,
                precision: Precision::Exact,
                matched: "explicit coordinates".into(),
            };
            return Ok((resolved, facility));
        }

        if let Some(facility) = facility {
            let resolved = self
                .coordinates
                .locate_facility(&facility)
                .or_else(|| Self::embedded_location(&facility))
                .ok_or_else(|| anyhow!("No coordinates known for facility {}", facility.name))?;
            return Ok((resolved, Some(facility)));
        }

        if let Some(id) = facility_id {
            let has_place = ["city", "state", "name"]
                .iter()
                .any(|key| optional_str(args, key).is_some());
            if !has_place {
                return Err(anyhow!("Unknown facility: {}", id));
            }
        }

        let descriptor = ResolveCoordinatesTool::descriptor(args)?;
        let resolved = self
            .coordinates
            .resolve_descriptor(&descriptor)
            .ok_or_else(|| anyhow!("No coordinates known for this location"))?;
        Ok((resolved, None))
    }

    /// Falls back to the point stored with a facility's precomputed analysis.
    fn embedded_location(facility: &FacilityDescriptor) -> Option<ResolvedCoordinate> {
        let bundle = facility.analysis.as_ref()?.parse().ok()?;
        Some(ResolvedCoordinate {
            location: bundle.location,
            precision: Precision::Exact,
            matched: facility.name.clone(),
        })
    }

    pub(crate) fn format_assessment(
        assessment: &Assessment,
        resolved: &ResolvedCoordinate,
        facility: Option<&FacilityDescriptor>,
    ) -> String {
        let analysis = &assessment.analysis;
        let CoordinatePair { lat, lon } = resolved.location;

        let mut result = match facility {
            Some(facility) if !facility.company.is_empty() => {
                format!("Site: {} ({})\n", facility.name, facility.company)
            }
            Some(facility) => format!("Site: {}\n", facility.name),
            None => format!("Site: {}\n", resolved.matched),
        };
        result.push_str(&format!(
            "Coordinates: {:.4}, {:.4} ({})\n",
            lat, lon, resolved.precision
        ));

        let origin = match assessment.origin {
            AssessmentOrigin::Embedded => "precomputed with the facility record",
            AssessmentOrigin::Cached => "cached",
            AssessmentOrigin::Fresh => "fresh analysis",
        };
        result.push_str(&format!("Source: {}\n", origin));
        if let Some(source) = &analysis.source {
            result.push_str(&format!("Analysis source: {}\n", source));
        }
        result.push_str(&format!("Analyzed at: {}\n\n", analysis.timestamp));

        result.push_str("Scores:\n");
        result.push_str(&format!(
            "- Overall suitability: {}{}\n",
            score(analysis.suitability.overall_score),
            rating(analysis.suitability.rating.as_deref())
        ));
        result.push_str(&format!(
            "- Solar: {}{}\n",
            score(analysis.solar.score),
            rating(analysis.solar.rating.as_deref())
        ));
        result.push_str(&format!(
            "- Wind: {}{}\n",
            score(analysis.wind.score),
            rating(analysis.wind.rating.as_deref())
        ));
        result.push_str(&format!(
            "- Water risk: {}{}\n",
            score(analysis.water.composite_risk_score),
            rating(analysis.water.rating.as_deref())
        ));

        if !analysis.suitability.insights.is_empty() {
            result.push_str("\nInsights:\n");
            for insight in &analysis.suitability.insights {
                result.push_str(&format!("- {}\n", insight));
            }
        }

        let live = &assessment.live;
        result.push('\n');
        if live.is_default() {
            result.push_str("Live weather: unavailable; defaults shown\n");
        } else {
            result.push_str(&format!(
                "Live weather: wind {:.1} m/s at 120m, {:.1} °C, {:.0}% cloud cover\n",
                live.wind_speed_120m, live.temperature_120m, live.cloud_cover
            ));
        }

        result
    }
}

fn rating(rating: Option<&str>) -> String {
    rating.map(|r| format!(" ({})", r)).unwrap_or_default()
}

#[async_trait]
impl ToolExecutor for AssessSiteTool {
    async fn execute(&self, arguments: Option<Value>) -> Result<Vec<Content>> {
        log::debug!("Executing AssessSiteTool");
        let args = arguments.ok_or_else(|| anyhow!("Missing arguments"))?;

        let (resolved, facility) = self.target(&args)?;

        if self.strict_precision && resolved.precision == Precision::StateCentroid {
            return Err(anyhow!(
                "Only a state centroid is known for {}; provide coordinates or a known city",
                resolved.matched
            ));
        }

        let assessment = self
            .assessments
            .resolve(resolved.location, facility.as_ref())
            .await?;

        let summary = Self::format_assessment(&assessment, &resolved, facility.as_ref());

        Ok(vec![
            text(summary),
            text(serde_json::to_string_pretty(&assessment)?),
        ])
    }

    fn to_tool(&self) -> Tool {
        tool(
            "assess_site",
            "Assess a data center site for solar, wind, water risk and overall suitability. Reuses precomputed or cached results for known facilities",
            json!({
                "type": "object",
                "properties": {
                    "lat": {
                        "type": "number",
                        "description": "Latitude in degrees; requires lon"
                    },
                    "lon": {
                        "type": "number",
                        "description": "Longitude in degrees; requires lat"
                    },
                    "facility_id": {
                        "type": "string",
                        "description": "Facility id from list_facilities; enables caching"
                    },
                    "city": {
                        "type": "string",
                        "description": "City used when no coordinates are given"
                    },
                    "state": {
                        "type": "string",
                        "description": "State used when no coordinates are given"
                    },
                    "name": {
                        "type": "string",
                        "description": "Free-text place name used when nothing else is given"
                    }
                }
            }),
        )
    }
}
