use thiserror::Error;
use crate::core::postal_code::PostalCode;
use crate::models::Coordinate;
use crate::services::{GoogleMapsClient, ProviderError};

/// Reasons a postal code could not be turned into a coordinate
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("'{0}' is not a valid Canadian postal code, use the format 'A1A 1A1'")]
    InvalidFormat(String),

    #[error("no location found for postal code {0}")]
    NotFound(String),

    #[error("location provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),
}

/// Validate a postal code locally, then geocode it
///
/// Malformed input never reaches the network.
pub async fn resolve(maps: &GoogleMapsClient, raw_input: &str) -> Result<Coordinate, LocateError> {
    let postal_code = PostalCode::parse(raw_input)?;

    let origin = maps
        .geocode(postal_code.as_str())
        .await?
        .ok_or_else(|| LocateError::NotFound(postal_code.to_string()))?;

    tracing::info!("Resolved {} to {}", postal_code, origin);
    Ok(origin)
}
