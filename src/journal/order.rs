use super::LogEntry;
use std::cmp::Ordering;

/// Ranked entries first (best rank first), then unranked entries newest first.
pub fn compare_for_listing(a: &LogEntry, b: &LogEntry) -> Ordering {
    match (a.rank, b.rank) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b
            .visited_on
            .cmp(&a.visited_on)
            .then_with(|| b.id.cmp(&a.id)),
    }
}
