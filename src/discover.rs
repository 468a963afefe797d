//! Restaurant discovery
//!
//! Loads a restaurant catalog and orders it by how closely each venue's
//! taste matches the user's reference profile.

use crate::matching::{rank_candidates, TasteCandidate};
use crate::taste::{TasteProfile, TasteVector};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A venue that can be recommended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub area: Option<String>,
    pub taste: TasteVector,
}

impl TasteCandidate for Restaurant {
    fn label(&self) -> &str {
        &self.name
    }

    fn taste(&self) -> &TasteVector {
        &self.taste
    }
}

/// A catalog venue with its match score
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation<'a> {
    pub restaurant: &'a Restaurant,
    pub score: u8,
}

/// Read a JSON array of restaurants
pub fn load_catalog(path: &Path) -> Result<Vec<Restaurant>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog: Vec<Restaurant> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;

    debug!(path = %path.display(), venues = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Best matches first, at most `limit` of them (0 = no limit).
pub fn recommend<'a>(
    reference: Option<&TasteProfile>,
    catalog: &'a [Restaurant],
    limit: usize,
) -> Vec<Recommendation<'a>> {
    let ranked = rank_candidates(reference, catalog);
    let take = if limit == 0 { ranked.len() } else { limit };

    ranked
        .into_iter()
        .take(take)
        .map(|(restaurant, score)| Recommendation { restaurant, score })
        .collect()
}
