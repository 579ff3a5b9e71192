use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::emotions::Emotion;
use crate::error::AnalysisError;
use crate::models::EmotionResult;

/// Lower bound (inclusive) of the primary confidence
pub const PRIMARY_CONFIDENCE_MIN: f64 = 0.65;
/// Upper bound (exclusive) the primary confidence is drawn from
pub const PRIMARY_CONFIDENCE_MAX: f64 = 0.95;
/// Share of the remaining budget a single secondary pick may take
pub const SECONDARY_BUDGET_FACTOR: f64 = 0.8;
/// Secondary picks under this confidence are dropped
pub const MIN_SECONDARY_CONFIDENCE: f64 = 0.05;
/// Fewest and most entries a ranked list may hold
pub const MIN_RESULTS: usize = 3;
pub const MAX_RESULTS: usize = 4;
/// Draws attempted before giving up on a ranked list
pub const MAX_DRAW_ATTEMPTS: usize = 64;
/// Highest primary confidence an accepted list can carry
///
/// Two kept secondaries need a budget of at least `0.05` for the first
/// and `0.05 / 0.8` left over for the second, so `1 - primary >= 0.1125`.
pub const REACHABLE_PRIMARY_MAX: f64 =
    1.0 - (MIN_SECONDARY_CONFIDENCE + MIN_SECONDARY_CONFIDENCE / SECONDARY_BUDGET_FACTOR);

/// Produce a ranked list of mock emotion results
///
/// Algorithm, per draw:
/// 1. Shuffle the seven labels
/// 2. Primary confidence uniform in [0.65, 0.95)
/// 3. Two or three secondary picks, each `u * remaining * 0.8`,
///    subtracted from `remaining = 1 - primary`; picks under 0.05 are dropped
/// 4. Sort descending by confidence
///
/// A draw that keeps fewer than two secondaries is redrawn, so every
/// returned list holds three or four entries. The redraw truncates the
/// primary: a primary above [`REACHABLE_PRIMARY_MAX`] (about 0.8875) leaves
/// too little budget for two picks of 0.05, so accepted primaries lie in
/// `[0.65, 0.8875]` rather than the full drawn range. It also favours
/// three-entry lists; four entries come back only a few percent of the time.
/// Confidences are not normalized and usually sum to less than one.
pub fn generate_results<R: Rng>(rng: &mut R) -> Result<Vec<EmotionResult>, AnalysisError> {
    for attempt in 1..=MAX_DRAW_ATTEMPTS {
        let results = draw(rng);
        if results.len() >= MIN_RESULTS {
            return Ok(results);
        }
        tracing::trace!(attempt, kept = results.len(), "Rejected short draw");
    }

    Err(AnalysisError::Exhausted {
        attempts: MAX_DRAW_ATTEMPTS,
    })
}

fn draw<R: Rng>(rng: &mut R) -> Vec<EmotionResult> {
    let mut labels = Emotion::ALL;
    labels.shuffle(rng);

    let primary = rng.gen_range(PRIMARY_CONFIDENCE_MIN..PRIMARY_CONFIDENCE_MAX);
    let secondary_count = rng.gen_range(2..=3usize);

    let mut results = Vec::with_capacity(MAX_RESULTS);
    results.push(EmotionResult::new(labels[0], primary));

    let mut remaining = 1.0 - primary;
    for &emotion in labels.iter().skip(1).take(secondary_count) {
        let confidence = rng.gen::<f64>() * remaining * SECONDARY_BUDGET_FACTOR;
        remaining -= confidence;

        if confidence >= MIN_SECONDARY_CONFIDENCE {
            results.push(EmotionResult::new(emotion, confidence));
        }
    }

    sort_descending(&mut results);
    results
}

/// Sort results by confidence, highest first
pub fn sort_descending(results: &mut [EmotionResult]) {
    results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
}
