use crate::core::distance::straight_line_km;
use crate::models::{Coordinate, NearbySearchRequest, StoreCandidate};
use crate::services::{GoogleMapsClient, ProviderError};

/// Find grocery stores near `origin`, closest first as ranked by the provider
///
/// An area without stores yields an empty list, not an error.
pub async fn find_nearby(
    maps: &GoogleMapsClient,
    origin: Coordinate,
    open_now: bool,
) -> Result<Vec<StoreCandidate>, ProviderError> {
    let request = NearbySearchRequest::groceries_near(origin, open_now);

    let candidates: Vec<StoreCandidate> = maps
        .nearby_search(&request)
        .await?
        .into_iter()
        .map(StoreCandidate::from)
        .collect();

    for candidate in &candidates {
        tracing::debug!(
            "Found {} ({}) {:.2} km away",
            candidate.name,
            candidate.place_id,
            straight_line_km(origin, candidate.location)
        );
    }

    tracing::info!("Found {} stores near {}", candidates.len(), origin);
    Ok(candidates)
}
