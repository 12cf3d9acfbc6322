// Core pipeline exports
pub mod distance;
pub mod enricher;
pub mod finder;
pub mod locator;
pub mod pipeline;
pub mod postal_code;
pub mod ranker;
pub mod scoring;
pub mod session;

pub use distance::{calculate_bounding_box, covering_box, is_within_bounding_box, straight_line_km};
pub use enricher::{attach_popularity, attach_travel, TravelEstimate};
pub use finder::find_nearby;
pub use locator::{resolve, LocateError};
pub use pipeline::{Pipeline, PipelineError, RunOutcome};
pub use postal_code::{validate_postal_code, PostalCode};
pub use ranker::{rank, TOP_N};
pub use scoring::{score, ScoringWeights};
pub use session::{Session, SessionEvent, SessionState};
