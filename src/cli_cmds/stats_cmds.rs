use anyhow::Result;
use gourmetlog::journal::Journal;
use gourmetlog::stats::JournalStats;
use std::path::Path;

pub fn cmd_stats(journal_path: &Path) -> Result<()> {
    let journal = Journal::open(journal_path)?;
    let stats = JournalStats::collect(&journal);

    println!("Gourmet Log Statistics");
    println!("======================");
    println!("  Entries:     {}", stats.total);
    println!("  Restaurants: {}", stats.restaurants);
    println!("  Liked:       {}", stats.liked);
    println!("  Okay:        {}", stats.okay);
    println!("  Disliked:    {}", stats.disliked);

    if !stats.cuisines.is_empty() {
        println!();
        println!("Top cuisines:");
        for (cuisine, count) in stats.cuisines.iter().take(5) {
            println!("  {} ({})", cuisine, count);
        }
    }

    if let Some(profile) = stats.profile {
        println!();
        println!("Taste profile: {}", profile);
        println!("You lean towards {}", profile.dominant());
    }

    Ok(())
}
