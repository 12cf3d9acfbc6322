use geo::{HaversineDistance, Point};
use crate::models::{BoundingBox, Coordinate};

/// Straight-line (great circle) distance between two coordinates in kilometers
#[inline]
pub fn straight_line_km(from: Coordinate, to: Coordinate) -> f64 {
    let from = Point::new(from.longitude, from.latitude);
    let to = Point::new(to.longitude, to.latitude);

    from.haversine_distance(&to) / 1000.0
}

/// Calculate a bounding box around a center point
///
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude)
pub fn calculate_bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / 111.0;
    let lon_delta = radius_km / (111.0 * center.latitude.to_radians().cos().abs());

    BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    }
}

/// Smallest box centered on `origin` that contains every point
///
/// Returns `None` when there are no points or they all sit on the origin.
pub fn covering_box<I>(origin: Coordinate, points: I) -> Option<BoundingBox>
where
    I: IntoIterator<Item = Coordinate>,
{
    let furthest_km = points
        .into_iter()
        .map(|point| straight_line_km(origin, point))
        .fold(0.0_f64, f64::max);

    if furthest_km <= 0.0 {
        return None;
    }

    // Pad so edge markers are not clipped by the viewport
    Some(calculate_bounding_box(origin, furthest_km * 1.1))
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Coordinate, bbox: &BoundingBox) -> bool {
    point.latitude >= bbox.min_lat
        && point.latitude <= bbox.max_lat
        && point.longitude >= bbox.min_lon
        && point.longitude <= bbox.max_lon
}
