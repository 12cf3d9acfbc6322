// Integration tests for Nearest Store

mod common;

use common::*;
use nearest_store::core::{attach_popularity, attach_travel, find_nearby, resolve, Session};
use nearest_store::models::Units;
use nearest_store::{Coordinate, GoogleMapsClient, LocateError, PipelineError, PopularTimesClient, ProviderError, StoreCandidate};
use serde_json::json;
use std::time::Duration;

fn origin() -> Coordinate {
    Coordinate::new(49.2827, -123.1207)
}

fn maps_client(server: &mockito::ServerGuard) -> GoogleMapsClient {
    GoogleMapsClient::new(server.url(), API_KEY.to_string(), Duration::from_secs(5)).unwrap()
}

fn popular_times_client(server: &mockito::ServerGuard) -> PopularTimesClient {
    PopularTimesClient::new(server.url(), None, Duration::from_secs(5)).unwrap()
}

fn five_places() -> Vec<Place> {
    vec![
        place("p1", "Fresh Market", 49.2830, -123.1210),
        place("p2", "Corner Grocer", 49.2840, -123.1220),
        place("p3", "Big Box Foods", 49.2850, -123.1230),
        place("p4", "Green Basket", 49.2860, -123.1240),
        place("p5", "Harbour Foods", 49.2870, -123.1250),
    ]
}

fn candidates(places: &[Place]) -> Vec<StoreCandidate> {
    places
        .iter()
        .map(|p| StoreCandidate::new(p.id, p.name, p.vicinity, p.location))
        .collect()
}

#[tokio::test]
async fn test_resolve_valid_postal_code() {
    let mut server = mockito::Server::new_async().await;
    let geocode = mock_geocode(&mut server, "V6B 1A1", origin()).await;

    let coordinate = resolve(&maps_client(&server), "v6b1a1").await.unwrap();

    assert_eq!(coordinate, origin());
    geocode.assert_async().await;
}

#[tokio::test]
async fn test_resolve_invalid_format_never_calls_provider() {
    let mut server = mockito::Server::new_async().await;
    let geocode = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = resolve(&maps_client(&server), "111 111").await;

    assert!(matches!(result, Err(LocateError::InvalidFormat(_))));
    geocode.assert_async().await;
}

#[tokio::test]
async fn test_resolve_zero_results_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    mock_geocode_zero_results(&mut server, "Z9Z 9Z9").await;

    let result = resolve(&maps_client(&server), "Z9Z 9Z9").await;

    match result {
        Err(LocateError::NotFound(code)) => assert_eq!(code, "Z9Z 9Z9"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_ok_without_results_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/geocode/json".to_string()))
        .match_query(mockito::Matcher::UrlEncoded("address".into(), "A1A 1A1".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "status": "OK", "results": [] }).to_string())
        .create_async()
        .await;

    let result = resolve(&maps_client(&server), "a1a1a1").await;

    match result {
        Err(LocateError::NotFound(code)) => assert_eq!(code, "A1A 1A1"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_server_error_is_provider_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/geocode/json".to_string()))
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let result = resolve(&maps_client(&server), "A1A 1A1").await;

    assert!(matches!(
        result,
        Err(LocateError::ProviderUnavailable(ProviderError::Status { status: 500, .. }))
    ));
}

#[tokio::test]
async fn test_resolve_denied_request_is_provider_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/geocode/json".to_string()))
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "status": "REQUEST_DENIED", "error_message": "bad key", "results": [] }).to_string())
        .create_async()
        .await;

    let result = resolve(&maps_client(&server), "A1A 1A1").await;

    assert!(matches!(
        result,
        Err(LocateError::ProviderUnavailable(ProviderError::Rejected { .. }))
    ));
}

#[tokio::test]
async fn test_find_nearby_keeps_provider_order() {
    let mut server = mockito::Server::new_async().await;
    let places = five_places();
    mock_places(&mut server, origin(), &places).await;

    let found = find_nearby(&maps_client(&server), origin(), false).await.unwrap();

    let ids: Vec<&str> = found.iter().map(|c| c.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3", "p4", "p5"]);
    assert!(found.iter().all(|c| c.travel_time_seconds.is_none() && c.current_popularity.is_none()));
}

#[tokio::test]
async fn test_find_nearby_open_now_filter() {
    let mut server = mockito::Server::new_async().await;
    let open_only = server
        .mock("GET", mockito::Matcher::Regex(r"^/place/nearbysearch/json".to_string()))
        .match_query(mockito::Matcher::UrlEncoded("opennow".into(), "true".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "status": "ZERO_RESULTS", "results": [] }).to_string())
        .create_async()
        .await;

    let found = find_nearby(&maps_client(&server), origin(), true).await.unwrap();

    assert!(found.is_empty());
    open_only.assert_async().await;
}

#[tokio::test]
async fn test_popularity_partial_data_does_not_abort() {
    let mut server = mockito::Server::new_async().await;
    let places = five_places();
    mock_popular_times(&mut server, "p1", json!({ "current_popularity": 40, "time_spent": [20, 30] })).await;
    mock_popular_times(&mut server, "p2", json!({})).await;
    mock_popular_times(&mut server, "p3", json!({ "international_phone_number": "+1 604-555-0100" })).await;
    mock_popular_times(&mut server, "p4", json!({ "current_popularity": 75 })).await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/places/p5(\?|$)".to_string()))
        .with_status(404)
        .create_async()
        .await;

    let mut stores = candidates(&places);
    attach_popularity(&popular_times_client(&server), &mut stores).await.unwrap();

    assert_eq!(stores[0].current_popularity, Some(40));
    assert_eq!(stores[0].wait_minutes, Some(20.0));
    assert_eq!(stores[1].current_popularity, None);
    assert_eq!(stores[1].wait_minutes, None);
    assert_eq!(stores[2].phone.as_deref(), Some("+1 604-555-0100"));
    assert_eq!(stores[2].current_popularity, None);
    assert_eq!(stores[3].current_popularity, Some(75));
    assert_eq!(stores[3].wait_minutes, None);
    assert_eq!(stores[4].current_popularity, None);
}

#[tokio::test]
async fn test_popularity_total_outage_aborts() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/places/".to_string()))
        .with_status(503)
        .create_async()
        .await;

    let mut stores = candidates(&five_places());
    let result = attach_popularity(&popular_times_client(&server), &mut stores).await;

    assert!(matches!(result, Err(ProviderError::Status { status: 503, .. })));
}

#[tokio::test]
async fn test_travel_failure_leaves_no_partial_data() {
    let mut server = mockito::Server::new_async().await;
    let places = five_places();
    mock_distance(&mut server, places[0].location, 400, "2 mins", 120).await;
    mock_distance(&mut server, places[1].location, 800, "4 mins", 240).await;
    mock_distance_status(&mut server, places[2].location, 500).await;
    mock_distance(&mut server, places[3].location, 1600, "8 mins", 480).await;
    mock_distance(&mut server, places[4].location, 2000, "10 mins", 600).await;

    let mut stores = candidates(&places);
    let result = attach_travel(&maps_client(&server), &mut stores, origin(), Units::Imperial).await;

    assert!(matches!(result, Err(ProviderError::Status { status: 500, .. })));
    assert!(stores.iter().all(|c| c.travel_time_seconds.is_none()
        && c.travel_time_text.is_none()
        && c.travel_distance_meters.is_none()));
}

#[tokio::test]
async fn test_travel_attaches_every_candidate() {
    let mut server = mockito::Server::new_async().await;
    let mut places = five_places();
    places.truncate(2);
    mock_distance(&mut server, places[0].location, 400, "2 mins", 120).await;
    mock_distance(&mut server, places[1].location, 800, "4 mins", 240).await;

    let mut stores = candidates(&places);
    attach_travel(&maps_client(&server), &mut stores, origin(), Units::Imperial).await.unwrap();

    assert_eq!(stores[0].travel_time_seconds, Some(120));
    assert_eq!(stores[0].travel_time_text.as_deref(), Some("2 mins"));
    assert_eq!(stores[1].travel_distance_meters, Some(800));
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let places = vec![
        place("p1", "Fresh Market", 49.2830, -123.1210),
        place("p2", "Corner Grocer", 49.2840, -123.1220),
        place("p3", "Big Box Foods", 49.2850, -123.1230),
    ];

    mock_places(&mut server, origin(), &places).await;
    mock_popular_times(&mut server, "p1", json!({ "current_popularity": 40, "time_spent": [20, 30] })).await;
    mock_popular_times(&mut server, "p2", json!({ "current_popularity": 20, "time_spent": [10] })).await;
    mock_popular_times(&mut server, "p3", json!({})).await;
    mock_distance(&mut server, places[0].location, 3000, "10 mins", 600).await;
    mock_distance(&mut server, places[1].location, 1500, "5 mins", 300).await;
    mock_distance(&mut server, places[2].location, 2400, "8 mins", 480).await;

    let pipeline = test_pipeline(&server, dir.path());
    let outcome = pipeline.run(origin()).await.unwrap();

    // 10/5 + 50/10 + 50/20 = 9.5 beats 10/10 + 50/20 + 50/40 = 4.75
    let names: Vec<&str> = outcome.report.iter().map(|e| e.candidate.name.as_str()).collect();
    assert_eq!(names, vec!["Corner Grocer", "Fresh Market", "Big Box Foods"]);
    assert!((outcome.report.entries[0].score - 9.5).abs() < 1e-9);
    assert!((outcome.report.entries[1].score - 4.75).abs() < 1e-9);
    assert_eq!(outcome.report.entries[2].score, 0.0);

    let mut reader = csv::Reader::from_path(&outcome.csv_path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, vec!["NAME", "LAT", "LON", "TRAVEL", "WAIT", "ADDRESS", "POPULARITY"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "Corner Grocer");
    assert_eq!(&rows[0][3], "5 mins");
    assert_eq!(&rows[0][4], "10");
    assert_eq!(&rows[0][6], "20");
    assert_eq!(&rows[2][0], "Big Box Foods");
    assert_eq!(&rows[2][4], "no data");
    assert_eq!(&rows[2][6], "no data");

    // Comma in the address is quoted, not split
    assert_eq!(&rows[1][5], "100 Main St, Vancouver");

    let html = std::fs::read_to_string(&outcome.map_path).unwrap();
    assert!(html.contains("var origin = [49.2827,-123.1207];"));
    assert!(html.contains("Corner Grocer"));
    assert!(html.contains("Big Box Foods"));
}

#[tokio::test]
async fn test_pipeline_empty_search_still_writes_outputs() {
    let mut server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    mock_places(&mut server, origin(), &[]).await;

    let outcome = test_pipeline(&server, dir.path()).run(origin()).await.unwrap();

    assert!(outcome.report.is_empty());
    let csv = std::fs::read_to_string(&outcome.csv_path).unwrap();
    assert_eq!(csv.lines().count(), 1);

    let html = std::fs::read_to_string(&outcome.map_path).unwrap();
    assert!(html.contains("var stores = [];"));
}

#[tokio::test]
async fn test_pipeline_travel_failure_resets_records() {
    let mut server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let places = vec![place("p1", "Fresh Market", 49.2830, -123.1210)];
    let settings = test_settings(&server.url(), dir.path());

    // Leftovers from an earlier run
    std::fs::write(&settings.output.csv_path, "NAME,LAT\nOld Store,1\n").unwrap();

    mock_places(&mut server, origin(), &places).await;
    mock_popular_times(&mut server, "p1", json!({ "current_popularity": 40 })).await;
    mock_distance_status(&mut server, places[0].location, 500).await;

    let pipeline = nearest_store::Pipeline::from_settings(&settings).unwrap();
    let result = pipeline.run(origin()).await;

    assert!(matches!(result, Err(PipelineError::ProviderUnavailable(_))));
    let csv = std::fs::read_to_string(&settings.output.csv_path).unwrap();
    assert_eq!(csv.trim_end(), "NAME,LAT,LON,TRAVEL,WAIT,ADDRESS,POPULARITY");
    assert!(!settings.output.map_path.exists());
}

#[tokio::test]
async fn test_session_rejects_then_runs_then_quits() {
    let mut server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let places = vec![
        place("p1", "Fresh Market", 49.2830, -123.1210),
        place("p2", "Corner Grocer", 49.2840, -123.1220),
    ];

    mock_geocode(&mut server, "A1A 1A1", origin()).await;
    mock_places(&mut server, origin(), &places).await;
    mock_popular_times(&mut server, "p1", json!({ "current_popularity": 40, "time_spent": [20] })).await;
    mock_popular_times(&mut server, "p2", json!({ "current_popularity": 20, "time_spent": [10] })).await;
    mock_distance(&mut server, places[0].location, 3000, "10 mins", 600).await;
    mock_distance(&mut server, places[1].location, 1500, "5 mins", 300).await;

    let pipeline = test_pipeline(&server, dir.path());
    let mut session = Session::new(&pipeline);
    let mut input: &[u8] = b"111 111\nA1A 1A1\nq\n";
    let mut output = Vec::new();
    let mut outcomes = Vec::new();

    let completed = session
        .drive(&mut input, &mut output, |outcome| outcomes.push(outcome.map_path.clone()))
        .await
        .unwrap();

    assert_eq!(completed, 1);
    assert_eq!(outcomes.len(), 1);

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("'111 111' is not a valid Canadian postal code"));
    assert!(text.contains("Top 2 of 2 stores near 49.2827,-123.1207:"));
    assert!(text.contains("1. Corner Grocer"));
    assert_eq!(text.matches("Enter a Canadian postal code").count(), 3);
}

#[tokio::test]
async fn test_session_not_found_and_outage_keep_prompting() {
    let mut server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();

    mock_geocode_zero_results(&mut server, "Z9Z 9Z9").await;
    mock_geocode(&mut server, "A1A 1A1", origin()).await;
    server
        .mock("GET", mockito::Matcher::Regex(r"^/place/nearbysearch/json".to_string()))
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let pipeline = test_pipeline(&server, dir.path());
    let mut session = Session::new(&pipeline);
    let mut input: &[u8] = b"Z9Z 9Z9\nA1A 1A1\nQ\n";
    let mut output = Vec::new();

    let completed = session.drive(&mut input, &mut output, |_| {}).await.unwrap();

    assert_eq!(completed, 0);
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("No location found for postal code Z9Z 9Z9."));
    assert!(text.contains("Search failed: provider unavailable"));
    assert!(text.contains("Try again or enter 'q' to quit."));
}

#[tokio::test]
async fn test_session_end_of_input_quits() {
    let server = mockito::Server::new_async().await;
    let dir = tempfile::tempdir().unwrap();
    let pipeline = test_pipeline(&server, dir.path());
    let mut session = Session::new(&pipeline);
    let mut input: &[u8] = b"";
    let mut output = Vec::new();

    let completed = session.drive(&mut input, &mut output, |_| {}).await.unwrap();

    assert_eq!(completed, 0);
    assert_eq!(session.state(), nearest_store::core::SessionState::Quitting);
}
