//! Gourmet log persistence
//!
//! Stores visit entries in a local JSON document. Liked entries carry a dense
//! personal ranking (1..N); everything else is unranked.

use crate::taste::TasteVector;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Current on-disk format version
pub const JOURNAL_VERSION: u32 = 1;

pub type EntryId = u64;

/// How a visit went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Liked,
    Okay,
    Disliked,
}

impl Verdict {
    /// Return human-readable display name for this verdict.
    pub fn display_name(self) -> &'static str {
        match self {
            Verdict::Liked => "Liked",
            Verdict::Okay => "Okay",
            Verdict::Disliked => "Disliked",
        }
    }
}

/// One logged visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: EntryId,
    pub restaurant: String,
    #[serde(default)]
    pub dish: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
    pub visited_on: NaiveDate,
    pub taste: TasteVector,
    pub verdict: Verdict,
    /// Position in the personal ranking; present only for liked entries
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    /// When the entry was logged (Unix timestamp)
    pub created_at: u64,
}

/// Fields supplied when logging a visit
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub restaurant: String,
    pub dish: Option<String>,
    pub cuisine: Option<String>,
    pub visited_on: NaiveDate,
    pub taste: TasteVector,
    pub verdict: Verdict,
    pub notes: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JournalError {
    #[error("no entry with id {0}")]
    UnknownEntry(EntryId),

    #[error("entry {0} is not liked and has no rank")]
    NotLiked(EntryId),

    #[error("liked entries must be placed through a ranking session")]
    RankingRequired,

    #[error("entry {0} is liked but has no rank")]
    MissingRank(EntryId),

    #[error("entry {0} is not liked but carries a rank")]
    UnexpectedRank(EntryId),

    #[error("ranking is not dense: expected rank {expected}, found {found}")]
    BrokenRanking { expected: u32, found: u32 },

    #[error("ranking changed since the comparison session started")]
    StaleSnapshot,

    #[error("entry id {0} appears more than once")]
    DuplicateId(EntryId),

    #[error("next id {next_id} would reuse stored id {max_id}")]
    StaleNextId { next_id: EntryId, max_id: EntryId },
}

/// Serialized journal document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalData {
    pub version: u32,
    pub next_id: EntryId,
    pub entries: Vec<LogEntry>,
}

impl Default for JournalData {
    fn default() -> Self {
        Self {
            version: JOURNAL_VERSION,
            next_id: 1,
            entries: Vec::new(),
        }
    }
}

/// Loaded journal bound to its storage file
#[derive(Debug, Clone)]
pub struct Journal {
    data: JournalData,
    path: PathBuf,
}

mod order;
mod store;

pub use order::compare_for_listing;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::{
        run_session, ComparisonOutcome, Judge, RankUpdate, RankedItem, RankingOutcome,
    };
    use anyhow::Result;

    fn new_entry(restaurant: &str, verdict: Verdict, day: u32) -> NewEntry {
        NewEntry {
            restaurant: restaurant.to_string(),
            dish: None,
            cuisine: Some("ramen".to_string()),
            visited_on: NaiveDate::from_ymd_opt(2026, 9, day).unwrap(),
            taste: TasteVector::new(3, 2, 4, 1, 5).unwrap(),
            verdict,
            notes: None,
        }
    }

    fn stored_entry(id: EntryId, verdict: Verdict, rank: Option<u32>) -> LogEntry {
        LogEntry {
            id,
            restaurant: format!("R{}", id),
            dish: None,
            cuisine: None,
            visited_on: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            taste: TasteVector::new(1, 1, 1, 1, 1).unwrap(),
            verdict,
            rank,
            notes: None,
            created_at: 0,
        }
    }

    fn temp_journal() -> (tempfile::TempDir, Journal) {
        let dir = tempfile::tempdir().unwrap();
        let journal = Journal::open(dir.path().join("journal.json")).unwrap();
        (dir, journal)
    }

    /// Prefers the new item over anything at or below the wanted rank
    struct WantRank(u32);

    impl Judge<EntryId> for WantRank {
        fn judge(&mut self, existing: &RankedItem<EntryId>) -> Result<ComparisonOutcome> {
            Ok(if existing.rank >= self.0 {
                ComparisonOutcome::NewPreferred
            } else {
                ComparisonOutcome::ExistingPreferred
            })
        }
    }

    fn add_liked(journal: &mut Journal, restaurant: &str, want: u32) -> EntryId {
        let outcome = run_session(journal.liked_snapshot(), &mut WantRank(want)).unwrap();
        journal
            .insert_ranked(new_entry(restaurant, Verdict::Liked, 1), &outcome)
            .unwrap()
    }

    fn ranking(journal: &Journal) -> Vec<(String, u32)> {
        journal
            .liked_snapshot()
            .into_iter()
            .map(|item| (journal.get(item.id).unwrap().restaurant.clone(), item.rank))
            .collect()
    }

    // --- insert ---

    #[test]
    fn test_open_missing_file_is_empty() {
        let (_dir, journal) = temp_journal();
        assert!(journal.entries().is_empty());
        assert!(journal.liked_snapshot().is_empty());
        assert_eq!(journal.reference_profile(), None);
    }

    #[test]
    fn test_insert_unranked_entry() {
        let (_dir, mut journal) = temp_journal();
        let id = journal
            .insert(new_entry("Noodle Bar", Verdict::Okay, 2))
            .unwrap();
        let entry = journal.get(id).unwrap();
        assert_eq!(entry.rank, None);
        assert_eq!(entry.verdict, Verdict::Okay);
    }

    #[test]
    fn test_insert_liked_requires_ranking() {
        let (_dir, mut journal) = temp_journal();
        assert_eq!(
            journal.insert(new_entry("Noodle Bar", Verdict::Liked, 2)),
            Err(JournalError::RankingRequired)
        );
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let (_dir, mut journal) = temp_journal();
        let first = journal.insert(new_entry("A", Verdict::Okay, 1)).unwrap();
        journal.remove(first).unwrap();
        let second = journal.insert(new_entry("B", Verdict::Okay, 1)).unwrap();
        assert!(second > first);
    }

    // --- ranked insertion ---

    #[test]
    fn test_insert_ranked_keeps_ranking_dense() {
        let (_dir, mut journal) = temp_journal();
        add_liked(&mut journal, "A", 1);
        add_liked(&mut journal, "B", 1);
        add_liked(&mut journal, "C", 2);
        add_liked(&mut journal, "D", 4);

        assert_eq!(
            ranking(&journal),
            vec![
                ("B".to_string(), 1),
                ("C".to_string(), 2),
                ("A".to_string(), 3),
                ("D".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_insert_ranked_rejects_stale_outcome() {
        let (_dir, mut journal) = temp_journal();
        add_liked(&mut journal, "A", 1);

        // Outcome computed against a snapshot that no longer matches
        let stale = RankingOutcome {
            new_rank: 1,
            insertion_index: 0,
            displaced: vec![RankUpdate { id: 999, rank: 2 }],
            comparisons: 1,
        };
        assert_eq!(
            journal.insert_ranked(new_entry("B", Verdict::Liked, 2), &stale),
            Err(JournalError::StaleSnapshot)
        );

        let out_of_range = RankingOutcome {
            new_rank: 5,
            insertion_index: 4,
            displaced: Vec::new(),
            comparisons: 1,
        };
        assert_eq!(
            journal.insert_ranked(new_entry("B", Verdict::Liked, 2), &out_of_range),
            Err(JournalError::StaleSnapshot)
        );

        assert_eq!(ranking(&journal), vec![("A".to_string(), 1)]);
        assert_eq!(journal.entries().len(), 1);
    }

    #[test]
    fn test_insert_ranked_rejects_unliked_entry() {
        let (_dir, mut journal) = temp_journal();
        let outcome = run_session(journal.liked_snapshot(), &mut WantRank(1)).unwrap();
        assert_eq!(
            journal.insert_ranked(new_entry("A", Verdict::Okay, 1), &outcome),
            Err(JournalError::RankingRequired)
        );
    }

    // --- removal and re-ranking ---

    #[test]
    fn test_remove_closes_rank_gap() {
        let (_dir, mut journal) = temp_journal();
        add_liked(&mut journal, "A", 1);
        let b = add_liked(&mut journal, "B", 2);
        add_liked(&mut journal, "C", 3);

        let removed = journal.remove(b).unwrap();
        assert_eq!(removed.restaurant, "B");
        assert_eq!(
            ranking(&journal),
            vec![("A".to_string(), 1), ("C".to_string(), 2)]
        );
        assert_eq!(journal.remove(b), Err(JournalError::UnknownEntry(b)));
    }

    #[test]
    fn test_rerank_moves_entry() {
        let (_dir, mut journal) = temp_journal();
        let a = add_liked(&mut journal, "A", 1);
        add_liked(&mut journal, "B", 2);
        add_liked(&mut journal, "C", 3);

        let snapshot = journal.snapshot_without(a).unwrap();
        assert_eq!(
            snapshot.iter().map(|i| i.rank).collect::<Vec<_>>(),
            vec![1, 2]
        );
        let outcome = run_session(snapshot, &mut WantRank(3)).unwrap();
        journal.apply_rerank(a, &outcome).unwrap();

        assert_eq!(
            ranking(&journal),
            vec![
                ("B".to_string(), 1),
                ("C".to_string(), 2),
                ("A".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_rerank_requires_liked_entry() {
        let (_dir, mut journal) = temp_journal();
        let id = journal.insert(new_entry("A", Verdict::Disliked, 1)).unwrap();
        assert_eq!(
            journal.snapshot_without(id).unwrap_err(),
            JournalError::NotLiked(id)
        );
        assert_eq!(
            journal.snapshot_without(42).unwrap_err(),
            JournalError::UnknownEntry(42)
        );
    }

    // --- persistence ---

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("journal.json");

        let mut journal = Journal::open(&path).unwrap();
        add_liked(&mut journal, "A", 1);
        add_liked(&mut journal, "B", 1);
        journal.insert(new_entry("C", Verdict::Okay, 3)).unwrap();
        journal.save().unwrap();

        let reloaded = Journal::open(&path).unwrap();
        assert_eq!(reloaded.entries(), journal.entries());
        assert_eq!(ranking(&reloaded), ranking(&journal));
    }

    #[test]
    fn test_open_rejects_gapped_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");

        let mut data = JournalData::default();
        data.entries.push(stored_entry(1, Verdict::Liked, Some(1)));
        data.entries.push(stored_entry(2, Verdict::Liked, Some(3)));
        data.next_id = 3;
        std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let err = Journal::open(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<JournalError>(),
            Some(&JournalError::BrokenRanking {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn test_open_rejects_next_id_behind_stored_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");

        let mut data = JournalData::default();
        data.entries.push(stored_entry(1, Verdict::Okay, None));
        data.next_id = 1;
        std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let err = Journal::open(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<JournalError>(),
            Some(&JournalError::StaleNextId {
                next_id: 1,
                max_id: 1
            })
        );
    }

    #[test]
    fn test_open_rejects_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");

        let mut data = JournalData::default();
        data.entries.push(stored_entry(2, Verdict::Okay, None));
        data.entries.push(stored_entry(2, Verdict::Disliked, None));
        data.next_id = 3;
        std::fs::write(&path, serde_json::to_string(&data).unwrap()).unwrap();

        let err = Journal::open(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<JournalError>(),
            Some(&JournalError::DuplicateId(2))
        );
    }

    #[test]
    fn test_save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");
        std::fs::write(&path, "{ not a journal").unwrap();

        let mut journal = Journal {
            data: JournalData::default(),
            path: path.clone(),
        };
        journal.insert(new_entry("A", Verdict::Okay, 2)).unwrap();
        journal.save().unwrap();
        assert_eq!(journal.path(), path.as_path());

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("journal.json")]);
        assert_eq!(Journal::open(&path).unwrap().entries().len(), 1);
    }

    // --- derived views ---

    #[test]
    fn test_reference_profile_averages_liked_entries() {
        let (_dir, mut journal) = temp_journal();
        journal.insert(new_entry("Meh", Verdict::Disliked, 1)).unwrap();
        assert_eq!(journal.reference_profile(), None);

        add_liked(&mut journal, "A", 1);
        let profile = journal.reference_profile().unwrap();
        assert_eq!(profile.values(), [3.0, 2.0, 4.0, 1.0, 5.0]);
    }

    #[test]
    fn test_listing_puts_ranked_first() {
        let (_dir, mut journal) = temp_journal();
        journal.insert(new_entry("Old", Verdict::Okay, 1)).unwrap();
        journal.insert(new_entry("New", Verdict::Disliked, 20)).unwrap();
        add_liked(&mut journal, "Second", 1);
        add_liked(&mut journal, "First", 1);

        let names: Vec<_> = journal
            .listing()
            .into_iter()
            .map(|e| e.restaurant.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "New", "Old"]);
    }
}
