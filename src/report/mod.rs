// Report exports
pub mod map;
pub mod records;

pub use map::{MapRenderer, MapView, DEFAULT_ZOOM};
pub use records::{RecordStore, HEADER};

use thiserror::Error;

/// Placeholder written wherever a provider had no data
pub const NO_DATA: &str = "no data";

/// Errors that can occur while writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minutes without a trailing `.0` for whole values
pub(crate) fn format_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{:.0}", minutes)
    } else {
        format!("{:.1}", minutes)
    }
}
