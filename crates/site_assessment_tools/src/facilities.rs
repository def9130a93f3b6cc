//! Facility registry loaded from a GeoJSON `FeatureCollection`.
//!
//! Each feature's `properties` is a facility record; a `Point` geometry
//! (`[lon, lat]`) supplies coordinates the properties leave out.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use site_model::FacilityDescriptor;

#[derive(Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Value,
}

#[derive(Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

impl Geometry {
    fn point(&self) -> Option<(f64, f64)> {
        if self.kind != "Point" {
            return None;
        }
        let coordinates = self.coordinates.as_array()?;
        let lon = coordinates.first()?.as_f64()?;
        let lat = coordinates.get(1)?.as_f64()?;
        Some((lat, lon))
    }
}

#[derive(Debug, Default)]
pub struct FacilityRegistry {
    facilities: Vec<FacilityDescriptor>,
    by_id: HashMap<String, usize>,
}

impl FacilityRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading facility registry {}", path.as_ref().display()))?;
        Self::from_geojson_str(&raw)
    }

    pub fn from_geojson_str(raw: &str) -> Result<Self> {
        let collection: FeatureCollection =
            serde_json::from_str(raw).context("parsing facility GeoJSON")?;

        let mut registry = Self::default();
        for (index, feature) in collection.features.into_iter().enumerate() {
            let mut facility: FacilityDescriptor = match serde_json::from_value(feature.properties) {
                Ok(facility) => facility,
                Err(err) => {
                    log::warn!("Skipping facility feature {}: {}", index, err);
                    continue;
                }
            };

            if facility.lat.is_none() || facility.lon.is_none() {
                if let Some((lat, lon)) = feature.geometry.as_ref().and_then(Geometry::point) {
                    facility.lat = Some(lat);
                    facility.lon = Some(lon);
                }
            }

            registry.insert(facility);
        }

        log::debug!("Loaded {} facilities", registry.len());
        Ok(registry)
    }

    pub fn from_facilities(facilities: impl IntoIterator<Item = FacilityDescriptor>) -> Self {
        let mut registry = Self::default();
        for facility in facilities {
            registry.insert(facility);
        }
        registry
    }

    fn insert(&mut self, facility: FacilityDescriptor) {
        if let Some(id) = facility.cache_id() {
            if self.by_id.contains_key(id) {
                log::warn!("Duplicate facility id {}; keeping the first", id);
                return;
            }
            self.by_id.insert(id.to_string(), self.facilities.len());
        }
        self.facilities.push(facility);
    }

    pub fn get(&self, id: &str) -> Option<&FacilityDescriptor> {
        self.by_id.get(id).map(|index| &self.facilities[*index])
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacilityDescriptor> {
        self.facilities.iter()
    }

    /// Facilities matching the given company and state, case-insensitively.
    pub fn filter(&self, company: Option<&str>, state: Option<&str>) -> Vec<&FacilityDescriptor> {
        let company = company.map(str::to_lowercase);
        let state = state.map(str::to_lowercase);

        self.facilities
            .iter()
            .filter(|facility| {
                company
                    .as_ref()
                    .is_none_or(|company| facility.company.to_lowercase() == *company)
            })
            .filter(|facility| {
                state.as_ref().is_none_or(|state| {
                    facility
                        .state
                        .as_deref()
                        .is_some_and(|candidate| candidate.to_lowercase() == *state)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use site_model::CoordinatePair;

    use super::*;

    const GEOJSON: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [73.86384, 18.60372]},
                "properties": {
                    "id": "stt-pune-dc-2",
                    "name": "STT Pune DC 2",
                    "company": "STT GDC India",
                    "city": "Pune",
                    "state": "Maharashtra",
                    "power_mw": "15",
                    "analysis": {
                        "wind": {}, "solar": {"score": 70.0}, "water": {}, "suitability": {},
                        "location": {"lat": 18.60372, "lon": 73.86384},
                        "timestamp": "2024-05-01T10:00:00"
                    }
                }
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [80.2536, 13.0587]},
                "properties": {
                    "id": "reliance-idc-chennai",
                    "name": "Reliance IDC Chennai",
                    "company": "Reliance Data Center",
                    "city": "Chennai",
                    "state": "Tamil Nadu",
                    "lat": 13.05872,
                    "lng": 80.25359
                }
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"name": "Unlisted", "company": "STT GDC India", "state": "Karnataka"}
            },
            {
                "type": "Feature",
                "properties": {"company": "Missing name"}
            }
        ]
    }"#;

    #[test]
    fn test_loads_features() {
        let registry = FacilityRegistry::from_geojson_str(GEOJSON).unwrap();

        assert_eq!(registry.len(), 3);
        let pune = registry.get("stt-pune-dc-2").unwrap();
        assert_eq!(pune.location(), Some(CoordinatePair::new(18.60372, 73.86384)));
        assert!(pune.analysis.is_some());
    }

    #[test]
    fn test_properties_coordinates_win_over_geometry() {
        let registry = FacilityRegistry::from_geojson_str(GEOJSON).unwrap();
        let chennai = registry.get("reliance-idc-chennai").unwrap();

        assert_eq!(chennai.location(), Some(CoordinatePair::new(13.05872, 80.25359)));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let registry = FacilityRegistry::from_geojson_str(GEOJSON).unwrap();

        assert_eq!(registry.filter(Some("stt gdc india"), None).len(), 2);
        assert_eq!(registry.filter(Some("STT GDC India"), Some("maharashtra")).len(), 1);
        assert_eq!(registry.filter(None, Some("Kerala")).len(), 0);
        assert_eq!(registry.filter(None, None).len(), 3);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let registry = FacilityRegistry::from_facilities([
            FacilityDescriptor::new("First", "A").with_id("dup"),
            FacilityDescriptor::new("Second", "B").with_id("dup"),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("dup").unwrap().name, "First");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datacenters.geojson");
        fs::write(&path, GEOJSON).unwrap();

        assert_eq!(FacilityRegistry::from_path(&path).unwrap().len(), 3);
        assert!(FacilityRegistry::from_path(dir.path().join("missing.geojson")).is_err());
    }
}
