use crate::core::scoring::score;
use crate::models::{RankedReport, ScoredCandidate, StoreCandidate};

/// Number of stores kept in a report
pub const TOP_N: usize = 5;

/// Score every candidate and keep the best `TOP_N`, highest score first
///
/// The sort is stable, so stores with equal scores keep the order the
/// provider returned them in (closest first). Fewer than `TOP_N` candidates
/// simply produce a shorter report.
pub fn rank(candidates: Vec<StoreCandidate>) -> RankedReport {
    let considered = candidates.len();
    let unscored = unscored_count(&candidates);
    if unscored > 0 {
        tracing::debug!("{} of {} stores lack data to score and rank last", unscored, considered);
    }

    let mut entries: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| {
            let score = score(&candidate);
            ScoredCandidate { candidate, score }
        })
        .collect();

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(TOP_N);

    if let Some(best) = entries.first() {
        tracing::info!(
            "Ranked {} stores, best is {} with score {:.2}",
            considered,
            best.candidate.name,
            best.score
        );
    }

    RankedReport { entries, considered }
}

/// Stores missing travel, wait or popularity data
fn unscored_count(candidates: &[StoreCandidate]) -> usize {
    candidates.iter().filter(|c| !c.has_score_inputs()).count()
}
