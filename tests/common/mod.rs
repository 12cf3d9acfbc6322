// Shared fixtures for the mockito-backed tests
#![allow(dead_code)]

use mockito::{Matcher, Mock, ServerGuard};
use nearest_store::config::Settings;
use nearest_store::{Coordinate, Pipeline};
use serde_json::json;
use std::path::Path;

pub const API_KEY: &str = "test-key";

pub fn test_settings(base_url: &str, out_dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.google.api_key = API_KEY.to_string();
    settings.google.base_url = base_url.to_string();
    settings.popular_times.base_url = base_url.to_string();
    settings.http.timeout_secs = 5;
    settings.output.csv_path = out_dir.join("stores.csv");
    settings.output.map_path = out_dir.join("local_map.html");
    settings.output.open_browser = false;
    settings
}

pub fn test_pipeline(server: &ServerGuard, out_dir: &Path) -> Pipeline {
    Pipeline::from_settings(&test_settings(&server.url(), out_dir))
        .expect("pipeline construction should not fail")
}

/// A store returned by the mocked places search
pub struct Place {
    pub id: &'static str,
    pub name: &'static str,
    pub vicinity: &'static str,
    pub location: Coordinate,
}

pub fn place(id: &'static str, name: &'static str, lat: f64, lng: f64) -> Place {
    Place {
        id,
        name,
        vicinity: "100 Main St, Vancouver",
        location: Coordinate::new(lat, lng),
    }
}

pub async fn mock_geocode(server: &mut ServerGuard, postal_code: &str, origin: Coordinate) -> Mock {
    server
        .mock("GET", Matcher::Regex(r"^/geocode/json".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), postal_code.into()),
            Matcher::UrlEncoded("key".into(), API_KEY.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "OK",
                "results": [{
                    "geometry": { "location": { "lat": origin.latitude, "lng": origin.longitude } }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await
}

pub async fn mock_geocode_zero_results(server: &mut ServerGuard, postal_code: &str) -> Mock {
    server
        .mock("GET", Matcher::Regex(r"^/geocode/json".to_string()))
        .match_query(Matcher::UrlEncoded("address".into(), postal_code.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "status": "ZERO_RESULTS", "results": [] }).to_string())
        .create_async()
        .await
}

pub async fn mock_places(server: &mut ServerGuard, origin: Coordinate, places: &[Place]) -> Mock {
    let results: Vec<serde_json::Value> = places
        .iter()
        .map(|p| {
            json!({
                "place_id": p.id,
                "name": p.name,
                "vicinity": p.vicinity,
                "geometry": { "location": { "lat": p.location.latitude, "lng": p.location.longitude } }
            })
        })
        .collect();

    server
        .mock("GET", Matcher::Regex(r"^/place/nearbysearch/json".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("location".into(), origin.to_string()),
            Matcher::UrlEncoded("rankby".into(), "distance".into()),
            Matcher::UrlEncoded("type".into(), "grocery_or_supermarket".into()),
            Matcher::UrlEncoded("key".into(), API_KEY.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "status": "OK", "results": results }).to_string())
        .create_async()
        .await
}

pub async fn mock_popular_times(server: &mut ServerGuard, place_id: &str, body: serde_json::Value) -> Mock {
    server
        .mock("GET", Matcher::Regex(format!(r"^/places/{}(\?|$)", place_id)))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

pub async fn mock_distance(
    server: &mut ServerGuard,
    destination: Coordinate,
    meters: u64,
    text: &str,
    seconds: u64,
) -> Mock {
    server
        .mock("GET", Matcher::Regex(r"^/distancematrix/json".to_string()))
        .match_query(Matcher::UrlEncoded("destinations".into(), destination.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "status": "OK",
                "rows": [{ "elements": [{
                    "status": "OK",
                    "distance": { "text": "1 mi", "value": meters },
                    "duration": { "text": text, "value": seconds }
                }]}]
            })
            .to_string(),
        )
        .create_async()
        .await
}

pub async fn mock_distance_status(server: &mut ServerGuard, destination: Coordinate, status: usize) -> Mock {
    server
        .mock("GET", Matcher::Regex(r"^/distancematrix/json".to_string()))
        .match_query(Matcher::UrlEncoded("destinations".into(), destination.to_string()))
        .with_status(status)
        .with_body("upstream error")
        .create_async()
        .await
}
