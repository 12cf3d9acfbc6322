use reqwest::{Client, StatusCode};
use std::time::Duration;
use crate::models::PopularTimesResponse;
use crate::services::http::{build_client, read_body};
use crate::services::ProviderError;

pub const POPULAR_TIMES: &str = "popular times";

/// Client for the popular-times service
///
/// The service answers `GET {base_url}/places/{place_id}` with whatever
/// subset of phone number, current popularity and time spent it knows.
pub struct PopularTimesClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl PopularTimesClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.into(),
            api_key,
            client: build_client(timeout)?,
        })
    }

    /// Fetch crowdedness data for a place
    ///
    /// An unknown place (404) or an empty body is "no data", not an error.
    pub async fn lookup(&self, place_id: &str) -> Result<PopularTimesResponse, ProviderError> {
        let url = format!(
            "{}/places/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(place_id)
        );

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                provider: POPULAR_TIMES,
                source,
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("No popular-times entry for place {}", place_id);
            return Ok(PopularTimesResponse::default());
        }

        let body = read_body(POPULAR_TIMES, response).await?;
        if body.trim().is_empty() {
            return Ok(PopularTimesResponse::default());
        }

        serde_json::from_str(&body).map_err(|e| ProviderError::InvalidResponse {
            provider: POPULAR_TIMES,
            reason: format!("Failed to parse popular times for {}: {}", place_id, e),
        })
    }
}
