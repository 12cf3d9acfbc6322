use serde::Serialize;
use crate::models::domain::{Coordinate, Units};

/// Place category searched by the store finder
pub const GROCERY_PLACE_TYPE: &str = "grocery_or_supermarket";

/// Query parameters for a places nearby search
#[derive(Debug, Clone, Serialize)]
pub struct NearbySearchRequest {
    pub location: String,
    pub rankby: &'static str,
    #[serde(rename = "type")]
    pub place_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opennow: Option<bool>,
}

impl NearbySearchRequest {
    /// Grocery stores ordered by distance from `origin`
    pub fn groceries_near(origin: Coordinate, open_now: bool) -> Self {
        Self {
            location: origin.to_string(),
            rankby: "distance",
            place_type: GROCERY_PLACE_TYPE,
            opennow: open_now.then_some(true),
        }
    }
}

/// Query parameters for a single origin/destination distance lookup
#[derive(Debug, Clone, Serialize)]
pub struct DistanceMatrixRequest {
    pub origins: String,
    pub destinations: String,
    pub units: Units,
}

impl DistanceMatrixRequest {
    pub fn new(origin: Coordinate, destination: Coordinate, units: Units) -> Self {
        Self {
            origins: origin.to_string(),
            destinations: destination.to_string(),
            units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opennow_omitted_unless_requested() {
        let origin = Coordinate::new(43.6, -79.4);

        let closed_too = serde_json::to_value(NearbySearchRequest::groceries_near(origin, false)).unwrap();
        assert!(closed_too.get("opennow").is_none());
        assert_eq!(closed_too["type"], "grocery_or_supermarket");
        assert_eq!(closed_too["rankby"], "distance");

        let open_only = serde_json::to_value(NearbySearchRequest::groceries_near(origin, true)).unwrap();
        assert_eq!(open_only["opennow"], true);
    }
}
