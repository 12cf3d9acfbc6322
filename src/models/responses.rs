use serde::Deserialize;
use crate::models::domain::{Coordinate, StoreCandidate};

/// Status reported by Google when a query matched nothing
pub const ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Status reported by Google for a successful query
pub const STATUS_OK: &str = "OK";

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coordinate {
    fn from(value: LatLng) -> Self {
        Coordinate::new(value.lat, value.lng)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// Geocoding API response
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

/// Places nearby search response
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Vec<PlaceResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResult {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub vicinity: String,
    pub geometry: Geometry,
}

impl From<PlaceResult> for StoreCandidate {
    fn from(place: PlaceResult) -> Self {
        StoreCandidate::new(
            place.place_id,
            place.name,
            place.vicinity,
            place.geometry.location.into(),
        )
    }
}

/// Popular-times lookup for a single place
///
/// Every field is optional: the provider returns whatever subset it has,
/// including nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PopularTimesResponse {
    #[serde(default)]
    pub international_phone_number: Option<String>,
    #[serde(default)]
    pub current_popularity: Option<u32>,
    #[serde(default)]
    pub time_spent: Option<Vec<f64>>,
}

impl PopularTimesResponse {
    pub fn is_empty(&self) -> bool {
        self.international_phone_number.is_none()
            && self.current_popularity.is_none()
            && self.wait_minutes().is_none()
    }

    /// First sample of the time-spent range, in minutes
    pub fn wait_minutes(&self) -> Option<f64> {
        self.time_spent.as_ref().and_then(|samples| samples.first().copied())
    }

    /// Copy every field the provider returned onto `candidate`, leaving the rest untouched
    pub fn apply_to(self, candidate: &mut StoreCandidate) {
        let wait_minutes = self.wait_minutes();
        if let Some(phone) = self.international_phone_number {
            candidate.phone = Some(phone);
        }
        if let Some(popularity) = self.current_popularity {
            candidate.current_popularity = Some(popularity);
        }
        if let Some(wait) = wait_minutes {
            candidate.wait_minutes = Some(wait);
        }
    }
}

/// Distance matrix response
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rows: Vec<DistanceMatrixRow>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl DistanceMatrixResponse {
    /// The first element of the first row, which is the only pair we ever ask for
    pub fn first_element(&self) -> Option<&DistanceMatrixElement> {
        self.rows.first().and_then(|row| row.elements.first())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixRow {
    #[serde(default)]
    pub elements: Vec<DistanceMatrixElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceMatrixElement {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub distance: Option<DistanceValue>,
    #[serde(default)]
    pub duration: Option<DurationValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DistanceValue {
    /// Meters
    pub value: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DurationValue {
    pub text: String,
    /// Seconds
    pub value: u64,
}
