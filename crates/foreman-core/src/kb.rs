//! Knowledge-base aggregate statistics.
//!
//! The backend records creative decisions (characters, constraints, world
//! facts) as it works; these counters are its own aggregation and are never
//! computed client-side.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregate counts of captured creative decisions by category.
///
/// Categories include at least `character`, `constraint`, and `world`.
/// Absence of the whole struct means "not yet available", which is distinct
/// from a present struct with zero counts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KbStats {
    /// Total number of knowledge-base entries.
    pub total_entries: u64,
    /// Entry counts keyed by category name.
    #[serde(default)]
    pub by_category: HashMap<String, u64>,
}

impl KbStats {
    /// Returns the count for a category, zero when the category is absent.
    pub fn category_count(&self, category: &str) -> u64 {
        self.by_category.get(category).copied().unwrap_or(0)
    }
}
