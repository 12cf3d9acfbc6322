use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the map in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Renders as `lat,lng`, the form every maps provider expects in a query
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A grocery store found near the origin, progressively enriched by the pipeline
///
/// Enrichment fields stay `None` when a provider has no data for the store.
/// `None` means "unknown", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreCandidate {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub current_popularity: Option<u32>,
    #[serde(default)]
    pub wait_minutes: Option<f64>,
    #[serde(default)]
    pub travel_distance_meters: Option<u64>,
    #[serde(default)]
    pub travel_time_text: Option<String>,
    #[serde(default)]
    pub travel_time_seconds: Option<u64>,
}

impl StoreCandidate {
    /// Create a candidate carrying only identity and geometry
    pub fn new(
        place_id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            place_id: place_id.into(),
            name: name.into(),
            address: address.into(),
            location,
            phone: None,
            current_popularity: None,
            wait_minutes: None,
            travel_distance_meters: None,
            travel_time_text: None,
            travel_time_seconds: None,
        }
    }

    /// True when every input of the score formula is known
    pub fn has_score_inputs(&self) -> bool {
        self.travel_time_seconds.is_some()
            && self.wait_minutes.is_some()
            && self.current_popularity.is_some()
    }
}

/// A candidate paired with the score of the current ranking pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: StoreCandidate,
    pub score: f64,
}

/// The best candidates of one run, highest score first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedReport {
    pub entries: Vec<ScoredCandidate>,
    /// How many candidates were scored to produce this report
    pub considered: usize,
}

impl RankedReport {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate> {
        self.entries.iter()
    }

    /// The highest ranked store, if any
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.entries.first()
    }
}

impl<'a> IntoIterator for &'a RankedReport {
    type Item = &'a ScoredCandidate;
    type IntoIter = std::slice::Iter<'a, ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Distance matrix unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    Metric,
    #[default]
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}
