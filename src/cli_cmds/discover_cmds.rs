use anyhow::{Context, Result};
use gourmetlog::discover::{load_catalog, recommend};
use gourmetlog::journal::Journal;
use gourmetlog::matching::compute_match_score;
use gourmetlog::taste::{TasteProfile, TasteVector};
use std::path::Path;

pub fn cmd_discover(journal_path: &Path, catalog: Option<&Path>, limit: usize) -> Result<()> {
    let catalog_path = catalog.context(
        "No restaurant catalog configured. Pass --catalog <file> or set discover.catalog in config.toml",
    )?;

    let journal = Journal::open(journal_path)?;
    let catalog = load_catalog(catalog_path)?;
    let reference = journal.reference_profile();

    if catalog.is_empty() {
        println!("Catalog is empty: {}", catalog_path.display());
        return Ok(());
    }

    match &reference {
        Some(profile) => println!("Your taste: {}", profile),
        None => println!("No liked entries yet; showing neutral scores."),
    }
    println!();

    for rec in recommend(reference.as_ref(), &catalog, limit) {
        let cuisine = rec.restaurant.cuisine.as_deref().unwrap_or("-");
        match rec.restaurant.area.as_deref() {
            Some(area) => println!(
                "  {:>2}%  {} ({}, {})",
                rec.score, rec.restaurant.name, cuisine, area
            ),
            None => println!("  {:>2}%  {} ({})", rec.score, rec.restaurant.name, cuisine),
        }
    }

    Ok(())
}

pub fn cmd_score(reference: Option<&TasteVector>, candidate: &TasteVector) {
    let reference = reference.copied().map(TasteProfile::from);
    println!("{}", compute_match_score(reference.as_ref(), candidate));
}
