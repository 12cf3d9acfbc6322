//! Nearest Store - finds the least crowded grocery store near a Canadian postal code
//!
//! This library resolves a postal code, searches nearby grocery stores, enriches
//! them with crowdedness and travel data, ranks them with a fixed weighted score
//! and writes the top results to a CSV file and an interactive map.

pub mod browser;
pub mod config;
pub mod core;
pub mod models;
pub mod report;
pub mod services;

// Re-export commonly used types
pub use self::core::{rank, score, validate_postal_code, Pipeline, PipelineError, LocateError, RunOutcome, Session};
pub use models::{Coordinate, RankedReport, ScoredCandidate, StoreCandidate};
pub use report::{MapRenderer, MapView, RecordStore, ReportError};
pub use services::{GoogleMapsClient, PopularTimesClient, ProviderError};
