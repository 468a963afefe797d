use crate::taste::{TasteProfile, TasteVector, DIMENSIONS, MAX_LEVEL, MIN_LEVEL};

/// Largest possible Manhattan distance between two taste vectors
const MAX_DISTANCE: f32 = ((MAX_LEVEL - MIN_LEVEL) as usize * DIMENSIONS) as f32;

/// Total absolute difference across all dimensions, in [0, 20]
pub(super) fn manhattan_distance(reference: &TasteProfile, candidate: &TasteVector) -> f32 {
    reference
        .values()
        .iter()
        .zip(candidate.levels())
        .map(|(r, c)| (r - f32::from(c)).abs())
        .sum()
}

/// Distance mapped onto 0..=100, where 100 means identical
pub(super) fn raw_percentage(distance: f32) -> f32 {
    100.0 - distance * 100.0 / MAX_DISTANCE
}

/// Round a raw percentage to a whole score, halves rounding up.
///
/// Averaged profiles carry f32 error in the last bits, so the value is first
/// snapped to a 0.001 grid; a true 97.5 computed as 97.49999 still gives 98.
pub(super) fn round_score(raw: f32) -> f32 {
    let snapped = (f64::from(raw) * 1000.0).round() / 1000.0;
    snapped.round() as f32
}

/// Higher score first; equal scores ordered by name so listings are stable.
pub(super) fn compare_scored_match(a: &(&str, u8), b: &(&str, u8)) -> std::cmp::Ordering {
    match b.1.cmp(&a.1) {
        std::cmp::Ordering::Equal => a.0.cmp(b.0),
        order => order,
    }
}
