mod tables;

use std::{collections::HashMap, fmt, fs, path::Path, sync::Arc};

use anyhow::{Context, Result};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{MapAccess, Visitor},
};
use site_model::{CoordinatePair, FacilityDescriptor, LocationDescriptor, fallback::first_success};

use crate::tables::{CITY_COORDINATES, STATE_COORDINATES};

/// How closely a resolved coordinate matches the place that was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Coordinates recorded on the facility itself.
    Exact,
    /// A known city or locality.
    Locality,
    /// The centroid of the state; good enough to place a marker.
    StateCentroid,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Exact => write!(f, "exact"),
            Precision::Locality => write!(f, "locality"),
            Precision::StateCentroid => write!(f, "state centroid"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedCoordinate {
    pub location: CoordinatePair,
    pub precision: Precision,
    /// The table key or source that produced the match.
    pub matched: String,
}

/// One step of the coordinate fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateTier {
    ExactCity,
    CaseInsensitiveCity,
    StateCentroid,
}

pub const DEFAULT_CHAIN: [CoordinateTier; 3] = [
    CoordinateTier::ExactCity,
    CoordinateTier::CaseInsensitiveCity,
    CoordinateTier::StateCentroid,
];

/// Immutable city and state lookup tables.
#[derive(Debug, Clone, Default)]
pub struct CoordinateTables {
    cities: Table,
    states: Table,
}

/// Entries in insertion order; replacing a key keeps its original position.
#[derive(Debug, Clone, Default)]
struct Table {
    entries: Vec<(String, CoordinatePair)>,
    index: HashMap<String, usize>,
}

impl Table {
    fn insert(&mut self, name: String, location: CoordinatePair) {
        match self.index.get(&name) {
            Some(position) => self.entries[*position].1 = location,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, location));
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn exact(&self, key: &str) -> Option<(String, CoordinatePair)> {
        self.index
            .get(key)
            .map(|position| (key.to_string(), self.entries[*position].1))
    }

    /// Keys differing only in case resolve to whichever was inserted first.
    fn case_insensitive(&self, key: &str) -> Option<(String, CoordinatePair)> {
        let needle = key.to_lowercase();
        self.entries
            .iter()
            .find(|(candidate, _)| candidate.to_lowercase() == needle)
            .map(|(candidate, pair)| (candidate.clone(), *pair))
    }
}

impl FromIterator<(String, CoordinatePair)> for Table {
    fn from_iter<I: IntoIterator<Item = (String, CoordinatePair)>>(entries: I) -> Self {
        let mut table = Table::default();
        for (name, location) in entries {
            table.insert(name, location);
        }
        table
    }
}

#[derive(Deserialize)]
struct TablesFile {
    #[serde(default)]
    cities: FileEntries,
    #[serde(default)]
    states: FileEntries,
}

/// A JSON object of `"Name": [lat, lon]`, kept in document order.
#[derive(Default)]
struct FileEntries(Vec<(String, CoordinatePair)>);

impl<'de> Deserialize<'de> for FileEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = FileEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "an object of name to [lat, lon]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FileEntries, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, [lat, lon])) = map.next_entry::<String, [f64; 2]>()? {
                    entries.push((name, CoordinatePair::new(lat, lon)));
                }
                Ok(FileEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl CoordinateTables {
    pub fn new<C, S>(cities: C, states: S) -> Self
    where
        C: IntoIterator<Item = (String, CoordinatePair)>,
        S: IntoIterator<Item = (String, CoordinatePair)>,
    {
        Self {
            cities: cities.into_iter().collect(),
            states: states.into_iter().collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(
            CITY_COORDINATES
                .iter()
                .map(|(name, lat, lon)| (name.to_string(), CoordinatePair::new(*lat, *lon))),
            STATE_COORDINATES
                .iter()
                .map(|(name, lat, lon)| (name.to_string(), CoordinatePair::new(*lat, *lon))),
        )
    }

    /// Adds or replaces entries from a JSON file shaped like
    /// `{"cities": {"Name": [lat, lon]}, "states": {"Name": [lat, lon]}}`.
    /// New names are appended after the existing ones in file order.
    pub fn extend_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading coordinate tables {}", path.as_ref().display()))?;
        self.extend_from_json(&raw)
    }

    pub fn extend_from_json(&mut self, raw: &str) -> Result<()> {
        let file: TablesFile = serde_json::from_str(raw).context("parsing coordinate tables")?;
        let (cities, states) = (file.cities.0.len(), file.states.0.len());

        for (name, location) in file.cities.0 {
            self.cities.insert(name, location);
        }
        for (name, location) in file.states.0 {
            self.states.insert(name, location);
        }

        log::debug!("Loaded {} city and {} state coordinate overrides", cities, states);
        Ok(())
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

/// Turns city/state/name descriptors into coordinates, degrading from
/// locality to state centroid. Never invents a point: no match is `None`.
#[derive(Debug, Clone)]
pub struct CoordinateResolver {
    tables: Arc<CoordinateTables>,
    chain: Vec<CoordinateTier>,
}

impl CoordinateResolver {
    pub fn new(tables: Arc<CoordinateTables>) -> Self {
        Self {
            tables,
            chain: DEFAULT_CHAIN.to_vec(),
        }
    }

    pub fn with_chain(mut self, chain: impl IntoIterator<Item = CoordinateTier>) -> Self {
        self.chain = chain.into_iter().collect();
        self
    }

    pub fn resolve(&self, city: &str, state: &str) -> Option<ResolvedCoordinate> {
        first_success(self.chain.iter().copied(), |tier| self.attempt(tier, city, state))
    }

    /// A free-text name is tried as a city first, then as a state.
    pub fn resolve_name(&self, name: &str) -> Option<ResolvedCoordinate> {
        self.resolve(name, name)
    }

    pub fn resolve_descriptor(&self, descriptor: &LocationDescriptor) -> Option<ResolvedCoordinate> {
        match descriptor {
            LocationDescriptor::Place { city, state } => self.resolve(city, state),
            LocationDescriptor::Name(name) => self.resolve_name(name),
        }
    }

    /// Best available point for a facility: its own coordinates, then its
    /// city/state, then its name.
    pub fn locate_facility(&self, facility: &FacilityDescriptor) -> Option<ResolvedCoordinate> {
        if let Some(location) = facility.location() {
            return Some(ResolvedCoordinate {
                location,
                precision: Precision::Exact,
                matched: facility.name.clone(),
            });
        }

        let city = facility.city.as_deref().unwrap_or_default();
        let state = facility.state.as_deref().unwrap_or_default();
        if !city.is_empty() || !state.is_empty() {
            if let Some(resolved) = self.resolve(city, state) {
                return Some(resolved);
            }
        }

        self.resolve_name(&facility.name)
    }

    fn attempt(&self, tier: CoordinateTier, city: &str, state: &str) -> Option<ResolvedCoordinate> {
        let (matched, location, precision) = match tier {
            CoordinateTier::ExactCity => {
                let (matched, location) = self.tables.cities.exact(city)?;
                (matched, location, Precision::Locality)
            }
            CoordinateTier::CaseInsensitiveCity => {
                let (matched, location) = self.tables.cities.case_insensitive(city)?;
                (matched, location, Precision::Locality)
            }
            CoordinateTier::StateCentroid => {
                let (matched, location) = self
                    .tables
                    .states
                    .exact(state)
                    .or_else(|| self.tables.states.case_insensitive(state))?;
                (matched, location, Precision::StateCentroid)
            }
        };

        log::debug!("Resolved city={:?} state={:?} via {:?} to {}", city, state, tier, location);

        Some(ResolvedCoordinate {
            location,
            precision,
            matched,
        })
    }
}

impl Default for CoordinateResolver {
    fn default() -> Self {
        Self::new(Arc::new(CoordinateTables::builtin()))
    }
}
