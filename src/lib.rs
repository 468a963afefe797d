//! Personal gourmet log
//!
//! Logs restaurant visits with a five-dimension taste impression, keeps liked
//! visits in a personal ranking built from pairwise comparisons, and orders
//! restaurants by how well they match the user's taste.

pub mod config;
pub mod discover;
pub mod journal;
pub mod matching;
pub mod ranking;
pub mod stats;
pub mod taste;
pub mod utils;
