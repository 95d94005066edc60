//! Rank extraction from raw results pages.
//!
//! Every match of the provider's lookup pattern is one result entry; its
//! 1-based ordinal among all matches is the entry's rank. An entry counts
//! for the target site when the pattern's second capture group contains the
//! target host, optionally followed by the configured directory path.

use regex::Regex;
use tracing::{debug, error, warn};
use url::Url;

use crate::{AppSettings, ProviderConfig, RankError, Ranks, Result};

/// Index of the capture group holding the result link.
const LINK_GROUP: usize = 2;

/// Computes the positions of a target site within a results page.
#[derive(Debug, Clone)]
pub struct RankCalculator {
    pattern: Regex,
    directory_path: Option<String>,
}

impl RankCalculator {
    /// Compiles the given lookup pattern.
    pub fn new(lookup_regex: &str) -> Result<Self> {
        if lookup_regex.is_empty() {
            error!("Lookup regex not found in the configuration");
            return Err(RankError::InvalidArgument(
                "lookup pattern not found".to_string(),
            ));
        }

        let pattern = Regex::new(lookup_regex)?;
        // captures_len counts the implicit whole-match group
        if pattern.captures_len() <= LINK_GROUP {
            warn!(
                pattern = lookup_regex,
                "Lookup regex has fewer than two capture groups; no result will match"
            );
        }

        Ok(Self {
            pattern,
            directory_path: None,
        })
    }

    /// Builds a calculator for a provider.
    pub fn for_provider(provider: &ProviderConfig) -> Result<Self> {
        Self::new(provider.lookup_pattern().unwrap_or_default())
    }

    /// Builds a calculator for the active provider in the settings.
    pub fn from_settings(settings: &AppSettings) -> Result<Self> {
        let provider = settings.active_provider()?;
        let calculator = Self::for_provider(&provider)?;
        Ok(match settings.directory_path() {
            Some(path) => calculator.with_directory_path(path),
            None => calculator,
        })
    }

    /// Sets the path appended to the target host before matching.
    pub fn with_directory_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.directory_path = if path.is_empty() { None } else { Some(path) };
        self
    }

    /// Returns the text a result link must contain to count for `target`.
    pub fn match_target(&self, target: &Url) -> Result<String> {
        let host = target
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| {
                RankError::InvalidArgument(format!("provided url has no host: {}", target))
            })?;

        // Plain concatenation: "/blah" also matches "/blahblah".
        let mut needle = host.to_string();
        if let Some(path) = &self.directory_path {
            needle.push_str(path);
        }
        Ok(needle)
    }

    /// Returns the positions at which `target` appears in `page`.
    pub fn ranks(&self, page: &str, target: &Url) -> Result<Ranks> {
        let needle = self.match_target(target)?;

        let mut total = 0usize;
        let positions: Vec<usize> = self
            .pattern
            .captures_iter(page)
            .enumerate()
            .inspect(|_| total += 1)
            .filter(|(_, caps)| {
                caps.get(LINK_GROUP)
                    .map_or("", |m| m.as_str())
                    .contains(needle.as_str())
            })
            .map(|(index, _)| index + 1)
            .collect();

        debug!(
            needle = %needle,
            matches = total,
            hits = positions.len(),
            "Ranked results page"
        );

        Ok(Ranks::from_positions(positions))
    }
}

/// Returns the rank string (`"1,3"`, or `"0"` when absent) of `target` in
/// `page`, using the active provider's lookup pattern.
pub fn extract_ranks(page: &str, target: &Url, settings: &AppSettings) -> Result<String> {
    let calculator = RankCalculator::from_settings(settings)?;
    Ok(calculator.ranks(page, target)?.to_string())
}
