use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gourmetlog::journal::{EntryId, Verdict};
use gourmetlog::taste::TasteVector;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gourmetlog")]
#[command(version)]
#[command(about = "Personal gourmet log with comparison-based ranking and taste matching")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Journal file (overrides the configured location)
    #[arg(short, long, global = true)]
    pub(crate) journal: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Manage logged visits
    Log {
        #[command(subcommand)]
        action: LogAction,
    },
    /// Re-rank a liked entry through a fresh round of comparisons
    Rank {
        /// Entry id
        id: EntryId,
    },
    /// Recommend restaurants from a catalog by taste match
    Discover {
        /// Restaurant catalog (JSON array)
        #[arg(short, long)]
        catalog: Option<PathBuf>,
        /// Maximum number of results (0 = all)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Compute the match score between two taste vectors
    Score {
        /// Reference taste as spiciness,sweetness,saltiness,acidity,richness
        #[arg(short, long)]
        reference: Option<TasteVector>,
        /// Candidate taste as spiciness,sweetness,saltiness,acidity,richness
        #[arg(short, long)]
        candidate: TasteVector,
    },
    /// Show journal statistics
    Stats,
}

#[derive(Subcommand)]
pub(crate) enum LogAction {
    /// Log a visit (liked visits are ranked interactively)
    Add {
        /// Restaurant name
        #[arg(short, long)]
        restaurant: String,
        /// Dish eaten
        #[arg(long)]
        dish: Option<String>,
        /// Cuisine
        #[arg(long)]
        cuisine: Option<String>,
        /// Visit date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Taste as spiciness,sweetness,saltiness,acidity,richness (each 1-5)
        #[arg(short, long)]
        taste: TasteVector,
        /// How the visit went
        #[arg(short, long, value_enum)]
        verdict: Verdict,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List logged visits, ranked ones first
    List {
        /// Only show entries with this verdict
        #[arg(short, long, value_enum)]
        verdict: Option<Verdict>,
    },
    /// Show one entry
    Show {
        /// Entry id
        id: EntryId,
    },
    /// Delete an entry
    Remove {
        /// Entry id
        id: EntryId,
    },
}
