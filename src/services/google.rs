use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use crate::models::{
    Coordinate, DistanceMatrixRequest, DistanceMatrixResponse, GeocodeResponse, NearbySearchRequest,
    PlaceResult, PlacesResponse, Units,
};
use crate::models::responses::{STATUS_OK, ZERO_RESULTS};
use crate::services::http::{build_client, read_json};
use crate::services::ProviderError;

pub const GEOCODING: &str = "geocoding";
pub const PLACES: &str = "places";
pub const DISTANCE_MATRIX: &str = "distance matrix";

/// Google Maps web services client
///
/// Covers the three Google endpoints the pipeline needs:
/// - Geocoding a postal code
/// - Searching grocery stores near a coordinate
/// - Travel distance and time between two coordinates
pub struct GoogleMapsClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GoogleMapsClient {
    /// Create a new client against `base_url` (e.g. `https://maps.googleapis.com/maps/api`)
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: build_client(timeout)?,
        })
    }

    /// Geocode a free-text address
    ///
    /// Returns `Ok(None)` when the geocoder found no match.
    pub async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, ProviderError> {
        tracing::debug!("Geocoding address: {}", address);

        let response: GeocodeResponse = self
            .get(GEOCODING, "geocode/json", &[("address", address)])
            .await?;

        if response.status == ZERO_RESULTS {
            return Ok(None);
        }
        check_status(GEOCODING, &response.status, response.error_message)?;

        Ok(response
            .results
            .first()
            .map(|result| result.geometry.location.into()))
    }

    /// Search places near a coordinate, in the provider's own order
    pub async fn nearby_search(
        &self,
        request: &NearbySearchRequest,
    ) -> Result<Vec<PlaceResult>, ProviderError> {
        tracing::debug!("Searching {} near {}", request.place_type, request.location);

        let response: PlacesResponse = self
            .get(PLACES, "place/nearbysearch/json", request)
            .await?;

        if response.status == ZERO_RESULTS {
            return Ok(Vec::new());
        }
        check_status(PLACES, &response.status, response.error_message)?;

        Ok(response.results)
    }

    /// Travel distance and duration from `origin` to `destination`
    pub async fn distance_matrix(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        units: Units,
    ) -> Result<DistanceMatrixResponse, ProviderError> {
        let request = DistanceMatrixRequest::new(origin, destination, units);
        tracing::debug!("Distance lookup {} -> {}", request.origins, request.destinations);

        let response: DistanceMatrixResponse = self
            .get(DISTANCE_MATRIX, "distancematrix/json", &request)
            .await?;

        check_status(DISTANCE_MATRIX, &response.status, response.error_message.clone())?;

        Ok(response)
    }

    async fn get<Q, T>(&self, provider: &'static str, path: &str, query: &Q) -> Result<T, ProviderError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| ProviderError::Request { provider, source })?;

        read_json(provider, response).await
    }
}

/// Google reports some failures inside a 200 response; anything but `OK` is a rejection
fn check_status(
    provider: &'static str,
    status: &str,
    message: Option<String>,
) -> Result<(), ProviderError> {
    // Some mirrors omit the status field entirely on success
    if status == STATUS_OK || status.is_empty() {
        return Ok(());
    }

    Err(ProviderError::Rejected {
        provider,
        status: status.to_string(),
        message,
    })
}
