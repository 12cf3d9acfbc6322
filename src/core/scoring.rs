use crate::models::StoreCandidate;

/// Weights of the desirability score
///
/// Each weight is tuned on its own; they are not meant to sum to anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub travel: f64,
    pub wait: f64,
    pub popularity: f64,
}

impl ScoringWeights {
    pub const FIXED: ScoringWeights = ScoringWeights {
        travel: TRAVEL_WEIGHT,
        wait: WAIT_WEIGHT,
        popularity: POPULARITY_WEIGHT,
    };
}

pub const TRAVEL_WEIGHT: f64 = 10.0;
pub const WAIT_WEIGHT: f64 = 50.0;
pub const POPULARITY_WEIGHT: f64 = 50.0;

/// Calculate the desirability score of a store; higher is better
///
/// Scoring formula:
/// score = (
///     TRAVEL_WEIGHT / travel_minutes +      # Quicker to reach = higher
///     WAIT_WEIGHT / wait_minutes +          # Shorter visit = higher
///     POPULARITY_WEIGHT / current_popularity  # Less crowded = higher
/// )
///
/// A store missing any of the three inputs scores exactly 0, and so does one
/// whose input would divide by zero. Incomplete data ranks last instead of
/// failing the run.
pub fn score(candidate: &StoreCandidate) -> f64 {
    score_with(candidate, &ScoringWeights::FIXED)
}

fn score_with(candidate: &StoreCandidate, weights: &ScoringWeights) -> f64 {
    let (Some(travel_seconds), Some(wait_minutes), Some(popularity)) = (
        candidate.travel_time_seconds,
        candidate.wait_minutes,
        candidate.current_popularity,
    ) else {
        return 0.0;
    };

    let travel_minutes = travel_seconds as f64 / 60.0;
    if travel_minutes <= 0.0 || wait_minutes.is_nan() || wait_minutes <= 0.0 || popularity == 0 {
        return 0.0;
    }

    let total = weights.travel / travel_minutes
        + weights.wait / wait_minutes
        + weights.popularity / popularity as f64;

    if total.is_finite() { total } else { 0.0 }
}
