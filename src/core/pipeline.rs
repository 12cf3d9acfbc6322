use std::path::PathBuf;
use thiserror::Error;
use crate::config::Settings;
use crate::core::{enricher, finder, locator, ranker, LocateError};
use crate::models::{Coordinate, RankedReport, Units};
use crate::report::{MapRenderer, RecordStore, ReportError};
use crate::services::{GoogleMapsClient, PopularTimesClient, ProviderError};

/// Reasons a pipeline run stopped early
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    #[error("failed to write report: {0}")]
    Report(#[from] ReportError),
}

/// Result of one complete run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub origin: Coordinate,
    pub report: RankedReport,
    pub csv_path: PathBuf,
    pub map_path: PathBuf,
}

/// Main orchestrator - finds, enriches, ranks and reports stores around an origin
///
/// # Pipeline Stages
/// 1. Nearby grocery search
/// 2. Popularity enrichment (best effort)
/// 3. Travel enrichment (all or nothing)
/// 4. Scoring and ranking
/// 5. CSV persistence and map rendering
pub struct Pipeline {
    maps: GoogleMapsClient,
    popular_times: PopularTimesClient,
    records: RecordStore,
    renderer: MapRenderer,
    map_path: PathBuf,
    open_now: bool,
    units: Units,
}

impl Pipeline {
    pub fn new(
        maps: GoogleMapsClient,
        popular_times: PopularTimesClient,
        records: RecordStore,
        renderer: MapRenderer,
        map_path: PathBuf,
    ) -> Self {
        Self {
            maps,
            popular_times,
            records,
            renderer,
            map_path,
            open_now: false,
            units: Units::default(),
        }
    }

    /// Build the provider clients and report writers described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, ProviderError> {
        let timeout = settings.http.timeout();

        let maps = GoogleMapsClient::new(
            settings.google.base_url.clone(),
            settings.google.api_key.clone(),
            timeout,
        )?;
        let popular_times = PopularTimesClient::new(
            settings.popular_times.base_url.clone(),
            settings.popular_times.api_key.clone(),
            timeout,
        )?;

        Ok(Self::new(
            maps,
            popular_times,
            RecordStore::new(settings.output.csv_path.clone()),
            MapRenderer::new(settings.output.zoom),
            settings.output.map_path.clone(),
        )
        .with_open_now(settings.search.open_now)
        .with_units(settings.search.units))
    }

    pub fn with_open_now(mut self, open_now: bool) -> Self {
        self.open_now = open_now;
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Turn raw postal code input into the origin coordinate
    pub async fn resolve(&self, raw_input: &str) -> Result<Coordinate, LocateError> {
        locator::resolve(&self.maps, raw_input).await
    }

    /// Run every stage for `origin`, in order
    ///
    /// The record file is reset before anything else, so an aborted run
    /// never leaves rows from a previous one behind.
    pub async fn run(&self, origin: Coordinate) -> Result<RunOutcome, PipelineError> {
        self.records.reset()?;

        let mut candidates = finder::find_nearby(&self.maps, origin, self.open_now).await?;

        enricher::attach_popularity(&self.popular_times, &mut candidates).await?;
        enricher::attach_travel(&self.maps, &mut candidates, origin, self.units).await?;

        let report = ranker::rank(candidates);
        self.records.persist(&report)?;

        self.renderer
            .render(&report, origin)?
            .save(&self.map_path)?;

        Ok(RunOutcome {
            origin,
            report,
            csv_path: self.records.path().to_path_buf(),
            map_path: self.map_path.clone(),
        })
    }
}
