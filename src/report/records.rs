use std::path::{Path, PathBuf};
use crate::models::{RankedReport, ScoredCandidate, StoreCandidate};
use crate::report::{format_minutes, ReportError, NO_DATA};

/// Column names of the record file
pub const HEADER: [&str; 7] = ["NAME", "LAT", "LON", "TRAVEL", "WAIT", "ADDRESS", "POPULARITY"];

/// Flat CSV file holding the ranked stores of the latest run
///
/// Every write truncates the file, so it never accumulates rows across runs.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Truncate the file down to its header row
    pub fn reset(&self) -> Result<(), ReportError> {
        self.write(&[])
    }

    /// Replace the file contents with one row per ranked store
    pub fn persist(&self, report: &RankedReport) -> Result<(), ReportError> {
        self.write(&report.entries)?;
        tracing::info!("Wrote {} stores to {}", report.len(), self.path.display());
        Ok(())
    }

    fn write(&self, entries: &[ScoredCandidate]) -> Result<(), ReportError> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        writer.write_record(HEADER)?;
        for entry in entries {
            writer.write_record(record(&entry.candidate))?;
        }

        writer.flush()?;
        Ok(())
    }
}

/// One CSV row; unknown enrichment is written as "no data"
fn record(candidate: &StoreCandidate) -> [String; 7] {
    [
        candidate.name.clone(),
        candidate.location.latitude.to_string(),
        candidate.location.longitude.to_string(),
        candidate
            .travel_time_text
            .clone()
            .unwrap_or_else(|| NO_DATA.to_string()),
        candidate
            .wait_minutes
            .map(format_minutes)
            .unwrap_or_else(|| NO_DATA.to_string()),
        candidate.address.clone(),
        candidate
            .current_popularity
            .map(|p| p.to_string())
            .unwrap_or_else(|| NO_DATA.to_string()),
    ]
}
