use super::{
    compare_for_listing, EntryId, Journal, JournalData, JournalError, LogEntry, NewEntry, Verdict,
    JOURNAL_VERSION,
};
use crate::ranking::{RankedItem, RankingOutcome};
use crate::taste::TasteProfile;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

impl Journal {
    /// Default storage path in the platform data directory
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "gourmetlog", "gourmetlog")
            .map(|dirs| dirs.data_dir().join("journal.json"))
            .unwrap_or_else(|| PathBuf::from("/tmp/gourmetlog/journal.json"))
    }

    /// Load the journal at `path`, or start an empty one if the file is missing.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut data = JournalData::default();

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read journal {}", path.display()))?;
            data = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse journal {}", path.display()))?;

            if data.version != JOURNAL_VERSION {
                warn!(
                    found = data.version,
                    expected = JOURNAL_VERSION,
                    "journal format version differs"
                );
            }
            verify_ids(&data)?;
            verify_ranks(&data.entries)?;
            debug!(path = %path.display(), entries = data.entries.len(), "journal loaded");
        }

        Ok(Self { data, path })
    }

    /// Write the journal back to its file.
    ///
    /// The new content goes to a sibling `.tmp` file that is renamed over the
    /// journal, so an interrupted write leaves the previous file intact.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write journal {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace journal {}", self.path.display()))?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.data.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&LogEntry> {
        self.data.entries.iter().find(|e| e.id == id)
    }

    /// Entries in display order
    pub fn listing(&self) -> Vec<&LogEntry> {
        let mut entries: Vec<&LogEntry> = self.data.entries.iter().collect();
        entries.sort_by(|a, b| compare_for_listing(a, b));
        entries
    }

    /// Ranked entries sorted by rank, ready to seed a ranking session
    pub fn liked_snapshot(&self) -> Vec<RankedItem<EntryId>> {
        let mut items: Vec<RankedItem<EntryId>> = self
            .data
            .entries
            .iter()
            .filter_map(|e| e.rank.map(|rank| RankedItem { id: e.id, rank }))
            .collect();
        items.sort_by_key(|item| item.rank);
        items
    }

    /// Ranking snapshot as it would look with `id` taken out and the gap closed
    pub fn snapshot_without(&self, id: EntryId) -> Result<Vec<RankedItem<EntryId>>, JournalError> {
        let entry = self.get(id).ok_or(JournalError::UnknownEntry(id))?;
        let removed = entry.rank.ok_or(JournalError::NotLiked(id))?;

        Ok(self
            .liked_snapshot()
            .into_iter()
            .filter(|item| item.id != id)
            .map(|item| RankedItem {
                rank: if item.rank > removed {
                    item.rank - 1
                } else {
                    item.rank
                },
                id: item.id,
            })
            .collect())
    }

    /// Average taste of liked entries, the reference for recommendations
    pub fn reference_profile(&self) -> Option<TasteProfile> {
        TasteProfile::average(
            self.data
                .entries
                .iter()
                .filter(|e| e.verdict == Verdict::Liked)
                .map(|e| &e.taste),
        )
    }

    /// Log an entry that does not take part in the ranking
    pub fn insert(&mut self, new: NewEntry) -> Result<EntryId, JournalError> {
        if new.verdict == Verdict::Liked {
            return Err(JournalError::RankingRequired);
        }

        let id = self.allocate_id();
        self.data.entries.push(build_entry(id, new, None));
        info!(id, "entry logged");
        Ok(id)
    }

    /// Log a liked entry at the rank a finished session chose, shifting the
    /// displaced entries in the same step.
    pub fn insert_ranked(
        &mut self,
        new: NewEntry,
        outcome: &RankingOutcome<EntryId>,
    ) -> Result<EntryId, JournalError> {
        if new.verdict != Verdict::Liked {
            return Err(JournalError::RankingRequired);
        }

        let mut staged = self.data.clone();
        apply_displacement(&mut staged.entries, outcome)?;

        let id = staged.next_id;
        staged.next_id += 1;
        staged
            .entries
            .push(build_entry(id, new, Some(outcome.new_rank)));
        verify_ranks(&staged.entries)?;

        self.data = staged;
        info!(
            id,
            rank = outcome.new_rank,
            displaced = outcome.displaced.len(),
            "liked entry ranked"
        );
        Ok(id)
    }

    /// Move an already liked entry to the rank chosen by a session started
    /// from [`Journal::snapshot_without`].
    pub fn apply_rerank(
        &mut self,
        id: EntryId,
        outcome: &RankingOutcome<EntryId>,
    ) -> Result<(), JournalError> {
        let mut staged = self.data.clone();
        detach_rank(&mut staged.entries, id)?;
        apply_displacement(&mut staged.entries, outcome)?;

        if let Some(entry) = staged.entries.iter_mut().find(|e| e.id == id) {
            entry.rank = Some(outcome.new_rank);
        }
        verify_ranks(&staged.entries)?;

        self.data = staged;
        info!(id, rank = outcome.new_rank, "entry re-ranked");
        Ok(())
    }

    /// Delete an entry, closing the gap it leaves in the ranking
    pub fn remove(&mut self, id: EntryId) -> Result<LogEntry, JournalError> {
        let index = self
            .data
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(JournalError::UnknownEntry(id))?;

        let removed = self.data.entries.remove(index);
        if let Some(rank) = removed.rank {
            close_gap(&mut self.data.entries, rank);
        }

        info!(id, "entry removed");
        Ok(removed)
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = self.data.next_id;
        self.data.next_id += 1;
        id
    }
}

fn build_entry(id: EntryId, new: NewEntry, rank: Option<u32>) -> LogEntry {
    let created_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    LogEntry {
        id,
        restaurant: new.restaurant,
        dish: new.dish,
        cuisine: new.cuisine,
        visited_on: new.visited_on,
        taste: new.taste,
        verdict: new.verdict,
        rank,
        notes: new.notes,
        created_at,
    }
}

fn close_gap(entries: &mut [LogEntry], removed_rank: u32) {
    for entry in entries.iter_mut() {
        if let Some(rank) = entry.rank.as_mut() {
            if *rank > removed_rank {
                *rank -= 1;
            }
        }
    }
}

fn detach_rank(entries: &mut [LogEntry], id: EntryId) -> Result<(), JournalError> {
    let entry = entries
        .iter_mut()
        .find(|e| e.id == id)
        .ok_or(JournalError::UnknownEntry(id))?;
    let rank = entry.rank.take().ok_or(JournalError::NotLiked(id))?;
    close_gap(entries, rank);
    Ok(())
}

/// Shift every displaced entry down by one after checking the outcome still
/// describes the current ranking.
fn apply_displacement(
    entries: &mut [LogEntry],
    outcome: &RankingOutcome<EntryId>,
) -> Result<(), JournalError> {
    let ranked = entries.iter().filter(|e| e.rank.is_some()).count();
    let at_or_after = entries
        .iter()
        .filter(|e| e.rank.is_some_and(|r| r >= outcome.new_rank))
        .count();

    if outcome.new_rank == 0
        || outcome.new_rank as usize > ranked + 1
        || at_or_after != outcome.displaced.len()
    {
        return Err(JournalError::StaleSnapshot);
    }

    for update in &outcome.displaced {
        let current = entries
            .iter()
            .find(|e| e.id == update.id)
            .and_then(|e| e.rank);
        if current.map(|r| r + 1) != Some(update.rank) {
            return Err(JournalError::StaleSnapshot);
        }
    }

    for update in &outcome.displaced {
        if let Some(entry) = entries.iter_mut().find(|e| e.id == update.id) {
            entry.rank = Some(update.rank);
        }
    }

    Ok(())
}

/// Ids are unique and all below `next_id`, so allocation never reuses one.
fn verify_ids(data: &JournalData) -> Result<(), JournalError> {
    let mut seen = HashSet::with_capacity(data.entries.len());
    for entry in &data.entries {
        if !seen.insert(entry.id) {
            return Err(JournalError::DuplicateId(entry.id));
        }
    }

    match data.entries.iter().map(|entry| entry.id).max() {
        Some(max_id) if data.next_id <= max_id => Err(JournalError::StaleNextId {
            next_id: data.next_id,
            max_id,
        }),
        _ => Ok(()),
    }
}

/// Liked entries must hold exactly the ranks 1..N; others must be unranked.
fn verify_ranks(entries: &[LogEntry]) -> Result<(), JournalError> {
    let mut ranks = Vec::new();

    for entry in entries {
        match (entry.verdict, entry.rank) {
            (Verdict::Liked, Some(rank)) => ranks.push(rank),
            (Verdict::Liked, None) => return Err(JournalError::MissingRank(entry.id)),
            (_, Some(_)) => return Err(JournalError::UnexpectedRank(entry.id)),
            (_, None) => {}
        }
    }

    ranks.sort_unstable();
    for (i, &found) in ranks.iter().enumerate() {
        let expected = i as u32 + 1;
        if found != expected {
            return Err(JournalError::BrokenRanking { expected, found });
        }
    }

    Ok(())
}
