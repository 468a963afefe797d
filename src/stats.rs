//! Journal summary figures

use crate::journal::{Journal, Verdict};
use crate::taste::TasteProfile;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub struct JournalStats {
    pub total: usize,
    pub liked: usize,
    pub okay: usize,
    pub disliked: usize,
    pub restaurants: usize,
    /// Cuisine counts, most logged first
    pub cuisines: Vec<(String, usize)>,
    pub profile: Option<TasteProfile>,
}

impl JournalStats {
    pub fn collect(journal: &Journal) -> Self {
        let mut by_verdict: HashMap<Verdict, usize> = HashMap::new();
        let mut cuisines: HashMap<String, usize> = HashMap::new();
        let mut restaurants = HashSet::new();

        for entry in journal.entries() {
            *by_verdict.entry(entry.verdict).or_default() += 1;
            restaurants.insert(entry.restaurant.trim().to_lowercase());
            if let Some(cuisine) = &entry.cuisine {
                *cuisines.entry(cuisine.trim().to_lowercase()).or_default() += 1;
            }
        }

        let mut cuisines: Vec<(String, usize)> = cuisines.into_iter().collect();
        cuisines.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let count = |v: Verdict| by_verdict.get(&v).copied().unwrap_or(0);
        Self {
            total: journal.entries().len(),
            liked: count(Verdict::Liked),
            okay: count(Verdict::Okay),
            disliked: count(Verdict::Disliked),
            restaurants: restaurants.len(),
            cuisines,
            profile: journal.reference_profile(),
        }
    }
}
