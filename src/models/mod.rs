// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{BoundingBox, Coordinate, RankedReport, ScoredCandidate, StoreCandidate, Units};
pub use requests::{DistanceMatrixRequest, NearbySearchRequest, GROCERY_PLACE_TYPE};
pub use responses::{
    DistanceMatrixElement, DistanceMatrixResponse, GeocodeResponse, PlaceResult, PlacesResponse,
    PopularTimesResponse,
};
