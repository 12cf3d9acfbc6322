use crate::models::{Coordinate, DistanceMatrixResponse, StoreCandidate, Units};
use crate::services::{GoogleMapsClient, PopularTimesClient, ProviderError};

/// Attach phone, current popularity and wait time to each candidate
///
/// Best effort: missing fields stay unknown and a failed lookup for one
/// store is logged and skipped. Only when every lookup fails, meaning the
/// provider is down, does the batch abort.
pub async fn attach_popularity(
    popular_times: &PopularTimesClient,
    candidates: &mut [StoreCandidate],
) -> Result<(), ProviderError> {
    let mut last_error = None;
    let mut failures = 0;

    for candidate in candidates.iter_mut() {
        match popular_times.lookup(&candidate.place_id).await {
            Ok(data) => {
                if data.is_empty() {
                    tracing::debug!("No popularity data for {}", candidate.name);
                }
                data.apply_to(candidate);
            }
            Err(e) => {
                tracing::warn!("Popularity lookup failed for {}: {}", candidate.name, e);
                failures += 1;
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if failures == candidates.len() => Err(e),
        _ => {
            tracing::info!(
                "Popularity attached to {} of {} stores",
                candidates.len() - failures,
                candidates.len()
            );
            Ok(())
        }
    }
}

/// Travel figures for one origin/destination pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelEstimate {
    pub distance_meters: Option<u64>,
    pub time_text: Option<String>,
    pub time_seconds: Option<u64>,
}

impl TravelEstimate {
    /// Read the first row/element of a distance matrix answer
    pub fn from_response(response: &DistanceMatrixResponse) -> Self {
        let Some(element) = response.first_element() else {
            return Self::default();
        };

        Self {
            distance_meters: element.distance.as_ref().map(|d| d.value),
            time_text: element.duration.as_ref().map(|d| d.text.clone()),
            time_seconds: element.duration.as_ref().map(|d| d.value),
        }
    }

    pub fn apply_to(self, candidate: &mut StoreCandidate) {
        candidate.travel_distance_meters = self.distance_meters;
        candidate.travel_time_text = self.time_text;
        candidate.travel_time_seconds = self.time_seconds;
    }
}

/// Attach travel distance and time from `origin` to each candidate
///
/// All or nothing: any failed lookup aborts the batch and no candidate is
/// modified.
pub async fn attach_travel(
    maps: &GoogleMapsClient,
    candidates: &mut [StoreCandidate],
    origin: Coordinate,
    units: Units,
) -> Result<(), ProviderError> {
    let mut estimates = Vec::with_capacity(candidates.len());

    for candidate in candidates.iter() {
        let response = maps
            .distance_matrix(origin, candidate.location, units)
            .await
            .inspect_err(|e| tracing::error!("Distance lookup failed for {}: {}", candidate.name, e))?;

        let estimate = TravelEstimate::from_response(&response);
        if estimate.time_seconds.is_none() {
            tracing::debug!("No route found to {}", candidate.name);
        }
        estimates.push(estimate);
    }

    for (candidate, estimate) in candidates.iter_mut().zip(estimates) {
        estimate.apply_to(candidate);
    }

    tracing::info!("Travel times attached to {} stores", candidates.len());
    Ok(())
}
