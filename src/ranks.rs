//! Rank result types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based positions at which a target site appeared in a results page.
///
/// Displays as a comma-separated list (`"1,3"`), or `"0"` when the site
/// was not found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranks(Vec<usize>);

impl Ranks {
    /// Creates an empty rank list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds ranks from positions, keeping them ascending and unique.
    pub fn from_positions(positions: impl IntoIterator<Item = usize>) -> Self {
        let mut positions: Vec<usize> = positions.into_iter().filter(|p| *p > 0).collect();
        positions.sort_unstable();
        positions.dedup();
        Self(positions)
    }

    /// Returns the positions.
    pub fn positions(&self) -> &[usize] {
        &self.0
    }

    /// Returns true when the site was not found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the highest (numerically lowest) position.
    pub fn best(&self) -> Option<usize> {
        self.0.first().copied()
    }
}

impl fmt::Display for Ranks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("0");
        }
        let joined = self
            .0
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// Outcome of one rank check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankReport {
    /// The search terms sent to the provider.
    pub terms: String,
    /// The site that was looked for.
    pub url: String,
    /// Display name of the provider that was queried.
    pub provider: String,
    /// Positions at which the site was found.
    pub ranks: Ranks,
    /// Fetch and extraction duration in milliseconds.
    pub duration_ms: u64,
}

impl RankReport {
    /// Returns the rank string shown to users.
    pub fn rank_string(&self) -> String {
        self.ranks.to_string()
    }

    /// Returns true when the site appeared at least once.
    pub fn found(&self) -> bool {
        !self.ranks.is_empty()
    }
}
