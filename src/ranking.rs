//! Comparison-based rank insertion
//!
//! Places a newly liked item into an existing dense ranking (1..N) by asking
//! an outside decision source to compare it against one existing item at a
//! time, binary-search style. A session is moved through each step by value,
//! so a finished session can never receive another comparison.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// An item of the liked subset together with its current rank (1-based)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem<Id> {
    pub id: Id,
    pub rank: u32,
}

/// Decision for one (new item, existing item) comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOutcome {
    NewPreferred,
    ExistingPreferred,
}

/// New rank for an existing item pushed down by the insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankUpdate<Id> {
    pub id: Id,
    pub rank: u32,
}

/// Terminal result of a ranking session.
///
/// `displaced` must be applied together with `new_rank` in one step so no
/// reader ever observes duplicate or missing ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingOutcome<Id> {
    pub new_rank: u32,
    /// 0-based position in the snapshot the new item was inserted at
    pub insertion_index: usize,
    pub displaced: Vec<RankUpdate<Id>>,
    pub comparisons: usize,
}

/// Binary-search state over an immutable snapshot of the liked list.
///
/// The open range `low..end` holds the positions still undecided; the
/// inclusive upper bound is `end - 1`.
#[derive(Debug, Clone)]
pub struct RankingSession<Id> {
    snapshot: Vec<RankedItem<Id>>,
    low: usize,
    end: usize,
    mid: usize,
    comparisons: usize,
}

/// Result of starting a session or submitting a comparison
#[derive(Debug, Clone)]
pub enum RankingStep<Id> {
    Comparing(RankingSession<Id>),
    Finished(RankingOutcome<Id>),
}

/// Decision source used by [`run_session`]
pub trait Judge<Id> {
    /// Compare the item being ranked against `existing`.
    fn judge(&mut self, existing: &RankedItem<Id>) -> Result<ComparisonOutcome>;
}

mod session;

pub use session::{max_comparisons, run_session};
