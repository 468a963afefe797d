use anyhow::Result;
use gourmetlog::journal::{Journal, JournalError, LogEntry, NewEntry, Verdict};
use std::path::Path;

use super::rank_cmds::{describe_entry, rank_new_entry};
use crate::LogAction;

pub fn cmd_log(action: LogAction, journal_path: &Path) -> Result<()> {
    match action {
        LogAction::Add {
            restaurant,
            dish,
            cuisine,
            date,
            taste,
            verdict,
            notes,
        } => {
            let mut journal = Journal::open(journal_path)?;
            let entry = NewEntry {
                restaurant,
                dish,
                cuisine,
                visited_on: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                taste,
                verdict,
                notes,
            };

            let id = if verdict == Verdict::Liked {
                let outcome = rank_new_entry(&journal, &entry)?;
                journal.insert_ranked(entry, &outcome)?
            } else {
                journal.insert(entry)?
            };
            journal.save()?;

            if let Some(logged) = journal.get(id) {
                match logged.rank {
                    Some(rank) => println!(
                        "✓ Logged #{} {} at rank {}",
                        id,
                        describe_entry(logged),
                        rank
                    ),
                    None => println!("✓ Logged #{} {}", id, describe_entry(logged)),
                }
            }
        }
        LogAction::List { verdict } => {
            let journal = Journal::open(journal_path)?;
            let entries: Vec<&LogEntry> = journal
                .listing()
                .into_iter()
                .filter(|e| verdict.map_or(true, |v| e.verdict == v))
                .collect();

            if entries.is_empty() {
                println!("No entries logged.");
                println!("Journal file: {}", journal.path().display());
                println!(
                    "Add one with: gourmetlog log add --restaurant <name> --taste 3,3,3,3,3 --verdict liked"
                );
            } else {
                for entry in entries {
                    let rank = entry
                        .rank
                        .map(|r| format!("{:>3}.", r))
                        .unwrap_or_else(|| "    ".to_string());
                    println!(
                        "{} [{}] {} - {}",
                        rank,
                        entry.id,
                        describe_entry(entry),
                        entry.verdict.display_name()
                    );
                }
            }
        }
        LogAction::Show { id } => {
            let journal = Journal::open(journal_path)?;
            let entry = journal.get(id).ok_or(JournalError::UnknownEntry(id))?;
            print_entry(entry);
        }
        LogAction::Remove { id } => {
            let mut journal = Journal::open(journal_path)?;
            let removed = journal.remove(id)?;
            journal.save()?;
            println!("Deleted #{} {}", id, describe_entry(&removed));
        }
    }

    Ok(())
}

fn print_entry(entry: &LogEntry) {
    println!("Entry #{}", entry.id);
    println!("  Restaurant: {}", entry.restaurant);
    if let Some(dish) = &entry.dish {
        println!("  Dish:       {}", dish);
    }
    if let Some(cuisine) = &entry.cuisine {
        println!("  Cuisine:    {}", cuisine);
    }
    println!("  Visited:    {}", entry.visited_on);
    println!("  Verdict:    {}", entry.verdict.display_name());
    if let Some(rank) = entry.rank {
        println!("  Rank:       #{}", rank);
    }
    println!("  Taste:      {}", gourmetlog::taste::TasteProfile::from(entry.taste));
    if let Some(notes) = &entry.notes {
        println!("  Notes:      {}", notes);
    }
}
