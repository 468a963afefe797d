use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Select};
use gourmetlog::journal::{EntryId, Journal, LogEntry, NewEntry};
use gourmetlog::ranking::{run_session, ComparisonOutcome, Judge, RankedItem, RankingOutcome};
use std::path::Path;

/// Asks the user which of two visits they enjoyed more
pub struct PromptJudge<'a> {
    journal: &'a Journal,
    candidate: String,
    theme: ColorfulTheme,
}

impl<'a> PromptJudge<'a> {
    pub fn new(journal: &'a Journal, candidate: String) -> Self {
        Self {
            journal,
            candidate,
            theme: ColorfulTheme::default(),
        }
    }
}

impl Judge<EntryId> for PromptJudge<'_> {
    fn judge(&mut self, existing: &RankedItem<EntryId>) -> Result<ComparisonOutcome> {
        let other = self
            .journal
            .get(existing.id)
            .map(describe_entry)
            .unwrap_or_else(|| format!("entry #{}", existing.id));
        let other = format!("#{} {}", existing.rank, other);

        let choice = Select::with_theme(&self.theme)
            .with_prompt("Which did you enjoy more?")
            .items(&[&self.candidate, &other])
            .default(0)
            .interact()
            .context("Comparison aborted; nothing was saved")?;

        Ok(if choice == 0 {
            ComparisonOutcome::NewPreferred
        } else {
            ComparisonOutcome::ExistingPreferred
        })
    }
}

pub fn describe_entry(entry: &LogEntry) -> String {
    describe(&entry.restaurant, entry.dish.as_deref(), &entry.visited_on)
}

pub fn describe_new(entry: &NewEntry) -> String {
    describe(&entry.restaurant, entry.dish.as_deref(), &entry.visited_on)
}

fn describe(restaurant: &str, dish: Option<&str>, date: &chrono::NaiveDate) -> String {
    match dish {
        Some(dish) => format!("{} - {} ({})", restaurant, dish, date),
        None => format!("{} ({})", restaurant, date),
    }
}

/// Run comparisons for a new liked entry against the current ranking
pub fn rank_new_entry(journal: &Journal, entry: &NewEntry) -> Result<RankingOutcome<EntryId>> {
    let mut judge = PromptJudge::new(journal, describe_new(entry));
    run_session(journal.liked_snapshot(), &mut judge)
}

pub fn cmd_rank(id: EntryId, journal_path: &Path) -> Result<()> {
    let mut journal = Journal::open(journal_path)?;

    let snapshot = journal.snapshot_without(id)?;
    let candidate = journal
        .get(id)
        .map(describe_entry)
        .unwrap_or_else(|| format!("entry #{}", id));

    if snapshot.is_empty() {
        println!("{} is the only liked entry; nothing to compare.", candidate);
        return Ok(());
    }

    println!("Re-ranking {}", candidate);
    let outcome = {
        let mut judge = PromptJudge::new(&journal, candidate.clone());
        run_session(snapshot, &mut judge)?
    };

    journal.apply_rerank(id, &outcome)?;
    journal.save()?;

    println!(
        "✓ {} is now #{} ({} comparison(s))",
        candidate, outcome.new_rank, outcome.comparisons
    );
    Ok(())
}
