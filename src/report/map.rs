use serde::Serialize;
use std::path::Path;
use crate::core::distance::covering_box;
use crate::models::{Coordinate, RankedReport, StoreCandidate};
use crate::report::{format_minutes, ReportError, NO_DATA};

/// Initial zoom level when there are no stores to fit the view to
pub const DEFAULT_ZOOM: u8 = 12;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Nearest grocery stores</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map { height: 100%; margin: 0; }
.store-rank { background: #2e7d32; color: #fff; border: 2px solid #fff; border-radius: 50%; text-align: center; font: bold 14px/24px sans-serif; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.4); }
.generated { position: absolute; bottom: 4px; left: 4px; z-index: 1000; padding: 2px 6px; background: rgba(255, 255, 255, 0.8); font: 11px sans-serif; }
</style>
</head>
<body>
<div id="map"></div>
<div class="generated">Generated {{GENERATED}}</div>
<script>
var origin = {{ORIGIN}};
var stores = {{STORES}};
var bounds = {{BOUNDS}};
var map = L.map('map').setView(origin, {{ZOOM}});
L.tileLayer('https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png', {
  maxZoom: 19,
  attribution: '&copy; OpenStreetMap contributors'
}).addTo(map);
L.circleMarker(origin, { radius: 9, color: 'white', fillColor: '#4286F5', fillOpacity: 1 })
  .bindTooltip('Current location')
  .addTo(map);
stores.forEach(function (store) {
  var icon = L.divIcon({ className: 'store-rank', html: String(store.rank), iconSize: [28, 28] });
  L.marker([store.lat, store.lon], { icon: icon })
    .bindTooltip('Click for more info.')
    .bindPopup(store.popup)
    .addTo(map);
});
if (bounds) {
  map.fitBounds(bounds);
}
</script>
</body>
</html>
"#;

/// Marker data handed to the page script
#[derive(Debug, Serialize)]
struct StoreMarker {
    rank: usize,
    lat: f64,
    lon: f64,
    popup: String,
}

/// A rendered, self-contained Leaflet map page
#[derive(Debug, Clone)]
pub struct MapView {
    html: String,
    markers: usize,
}

impl MapView {
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Number of store markers, not counting the origin
    pub fn marker_count(&self) -> usize {
        self.markers
    }

    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        std::fs::write(path, &self.html)?;
        tracing::info!("Saved map to {}", path.display());
        Ok(())
    }
}

/// Renders ranked stores as an interactive map
#[derive(Debug, Clone, Copy)]
pub struct MapRenderer {
    zoom: u8,
}

impl MapRenderer {
    pub fn new(zoom: u8) -> Self {
        Self { zoom }
    }

    /// Build a map centered on `origin` with one numbered marker per ranked store
    pub fn render(&self, report: &RankedReport, origin: Coordinate) -> Result<MapView, ReportError> {
        let stores: Vec<StoreMarker> = report
            .iter()
            .enumerate()
            .map(|(i, entry)| StoreMarker {
                rank: i + 1,
                lat: entry.candidate.location.latitude,
                lon: entry.candidate.location.longitude,
                popup: popup_html(i + 1, &entry.candidate),
            })
            .collect();

        let bounds = covering_box(origin, report.iter().map(|e| e.candidate.location))
            .map(|b| [[b.min_lat, b.min_lon], [b.max_lat, b.max_lon]]);

        let html = TEMPLATE
            .replace("{{GENERATED}}", &chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string())
            .replace("{{ORIGIN}}", &script_json(&[origin.latitude, origin.longitude])?)
            .replace("{{BOUNDS}}", &script_json(&bounds)?)
            .replace("{{ZOOM}}", &self.zoom.to_string())
            // Last, so placeholders inside store names stay literal
            .replace("{{STORES}}", &script_json(&stores)?);

        Ok(MapView {
            html,
            markers: stores.len(),
        })
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}

fn popup_html(rank: usize, candidate: &StoreCandidate) -> String {
    let travel = candidate.travel_time_text.as_deref().unwrap_or(NO_DATA);
    let wait = candidate
        .wait_minutes
        .map(|m| format!("{} min", format_minutes(m)))
        .unwrap_or_else(|| NO_DATA.to_string());
    let popularity = candidate
        .current_popularity
        .map(|p| format!("{}%", p))
        .unwrap_or_else(|| NO_DATA.to_string());

    let mut html = format!(
        "<h3>{}. {}</h3>\
         <p>Estimated travel time: {}</p>\
         <p>Current wait time: {}</p>\
         <p>Address: {}</p>\
         <p>Popularity: {}</p>",
        rank,
        escape_html(&candidate.name),
        escape_html(travel),
        escape_html(&wait),
        escape_html(&candidate.address),
        escape_html(&popularity),
    );
    if let Some(phone) = &candidate.phone {
        html.push_str(&format!("<p>Phone: {}</p>", escape_html(phone)));
    }
    html
}

/// JSON that can sit inside a `<script>` element
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ReportError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
