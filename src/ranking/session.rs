use super::{
    ComparisonOutcome, Judge, RankUpdate, RankedItem, RankingOutcome, RankingSession, RankingStep,
};
use anyhow::Result;
use tracing::debug;

impl<Id: Clone> RankingSession<Id> {
    /// Start ranking a new item against `existing`, sorted by rank with no gaps.
    ///
    /// An empty list needs no comparison and finishes at rank 1.
    pub fn start(existing: Vec<RankedItem<Id>>) -> RankingStep<Id> {
        debug_assert!(
            existing
                .iter()
                .enumerate()
                .all(|(i, item)| item.rank as usize == i + 1),
            "ranking snapshot must be sorted and dense"
        );

        if existing.is_empty() {
            return RankingStep::Finished(RankingOutcome {
                new_rank: 1,
                insertion_index: 0,
                displaced: Vec::new(),
                comparisons: 0,
            });
        }

        let end = existing.len();
        RankingStep::Comparing(Self {
            snapshot: existing,
            low: 0,
            end,
            mid: (end - 1) / 2,
            comparisons: 0,
        })
    }

    /// Item the new one must be compared against next
    pub fn target(&self) -> &RankedItem<Id> {
        &self.snapshot[self.mid]
    }

    /// Current inclusive search bounds `(low, high)` over snapshot positions
    pub fn bounds(&self) -> (usize, usize) {
        (self.low, self.end - 1)
    }

    /// Number of snapshot positions still undecided
    pub fn remaining(&self) -> usize {
        self.end - self.low
    }

    /// Decisions submitted so far
    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    /// Apply one decision for the current target.
    pub fn submit(mut self, outcome: ComparisonOutcome) -> RankingStep<Id> {
        self.comparisons += 1;

        match outcome {
            ComparisonOutcome::NewPreferred => self.end = self.mid,
            ComparisonOutcome::ExistingPreferred => self.low = self.mid + 1,
        }

        if self.low >= self.end {
            return RankingStep::Finished(self.finish());
        }

        self.mid = self.low + (self.end - 1 - self.low) / 2;
        RankingStep::Comparing(self)
    }

    fn finish(self) -> RankingOutcome<Id> {
        let insertion_index = self.low;
        let displaced = self.snapshot[insertion_index..]
            .iter()
            .map(|item| RankUpdate {
                id: item.id.clone(),
                rank: item.rank + 1,
            })
            .collect();

        RankingOutcome {
            new_rank: insertion_index as u32 + 1,
            insertion_index,
            displaced,
            comparisons: self.comparisons,
        }
    }
}

/// Upper bound on decisions needed for a list of `len` items: ceil(log2(len + 1))
pub fn max_comparisons(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

/// Drive a session to completion, asking `judge` for every comparison.
///
/// A judge error abandons the session; nothing has been applied at that point.
pub fn run_session<Id, J>(existing: Vec<RankedItem<Id>>, judge: &mut J) -> Result<RankingOutcome<Id>>
where
    Id: Clone,
    J: Judge<Id> + ?Sized,
{
    let mut step = RankingSession::start(existing);

    loop {
        match step {
            RankingStep::Finished(outcome) => {
                debug!(
                    new_rank = outcome.new_rank,
                    comparisons = outcome.comparisons,
                    displaced = outcome.displaced.len(),
                    "ranking session finished"
                );
                return Ok(outcome);
            }
            RankingStep::Comparing(session) => {
                let (low, high) = session.bounds();
                debug!(
                    low,
                    high,
                    target_rank = session.target().rank,
                    asked = session.comparisons(),
                    "comparing"
                );
                let outcome = judge.judge(session.target())?;
                step = session.submit(outcome);
            }
        }
    }
}
