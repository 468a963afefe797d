//! Taste-similarity scoring
//!
//! Compares a reference taste profile against candidate taste vectors and
//! reports a bounded match percentage used to order recommendations.
//!
//! The bounds and the neutral default are presentation choices, not values
//! derived from the distance metric.

use crate::taste::{TasteProfile, TasteVector};

/// Lowest score ever reported
pub const MATCH_SCORE_FLOOR: u8 = 10;
/// Highest score ever reported; a perfect match is shown as 99, never 100
pub const MATCH_SCORE_CEILING: u8 = 99;
/// Score used when there is no reference profile to compare against
pub const NEUTRAL_MATCH_SCORE: u8 = 80;

mod scoring;

use scoring::{compare_scored_match, manhattan_distance, raw_percentage, round_score};

/// Anything that can be ranked by taste similarity
pub trait TasteCandidate {
    fn label(&self) -> &str;
    fn taste(&self) -> &TasteVector;
}

/// Match percentage of `candidate` against `reference`, in 10..=99.
///
/// Fractional percentages from averaged references round to the nearest
/// whole score, with exact halves rounding up, before clamping.
pub fn match_score(reference: &TasteProfile, candidate: &TasteVector) -> u8 {
    let raw = round_score(raw_percentage(manhattan_distance(reference, candidate)));
    raw.clamp(
        f32::from(MATCH_SCORE_FLOOR),
        f32::from(MATCH_SCORE_CEILING),
    ) as u8
}

/// Like [`match_score`], falling back to [`NEUTRAL_MATCH_SCORE`] without a reference.
pub fn compute_match_score(reference: Option<&TasteProfile>, candidate: &TasteVector) -> u8 {
    match reference {
        Some(reference) => match_score(reference, candidate),
        None => NEUTRAL_MATCH_SCORE,
    }
}

/// Score every candidate and return them best match first.
pub fn rank_candidates<'a, C: TasteCandidate>(
    reference: Option<&TasteProfile>,
    candidates: &'a [C],
) -> Vec<(&'a C, u8)> {
    let mut scored: Vec<(&'a C, u8)> = candidates
        .iter()
        .map(|candidate| (candidate, compute_match_score(reference, candidate.taste())))
        .collect();

    scored.sort_by(|a, b| compare_scored_match(&(a.0.label(), a.1), &(b.0.label(), b.1)));
    scored
}
