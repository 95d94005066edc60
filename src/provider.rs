//! Search provider configuration.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::{RankError, Result};

/// Settings for one search provider, as found under `HttpClientSettings:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderConfig {
    /// Provider identifier (the key under `HttpClientSettings`).
    #[serde(skip)]
    pub id: String,
    /// Absolute address the search path is resolved against.
    #[serde(default)]
    pub base_address: Option<String>,
    /// Result-count hint sent as `num`; absent or zero means "provider default".
    #[serde(default, deserialize_with = "deserialize_result_count")]
    pub max_search_results: Option<u32>,
    /// Extraction pattern; its second capture group yields the result link.
    #[serde(default)]
    pub lookup_regex: Option<String>,
    /// Human-readable provider name.
    #[serde(default)]
    pub search_engine_name: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_timeout() -> u64 {
    30
}

// Settings files often store every value as a string, so counts may arrive
// as `"100"` as well as `100`.
fn deserialize_result_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i64),
        Text(String),
    }

    let count = match Option::<Count>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Count::Number(n)) => n,
        Some(Count::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(Count::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(<D::Error as serde::de::Error>::custom)?,
    };

    Ok(u32::try_from(count).ok().filter(|n| *n > 0))
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            base_address: None,
            max_search_results: None,
            lookup_regex: None,
            search_engine_name: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl ProviderConfig {
    /// Creates an empty configuration for the given provider id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the base address.
    pub fn with_base_address(mut self, address: impl Into<String>) -> Self {
        self.base_address = Some(address.into());
        self
    }

    /// Sets the result-count hint.
    pub fn with_max_search_results(mut self, max: u32) -> Self {
        self.max_search_results = Some(max);
        self
    }

    /// Sets the extraction pattern.
    pub fn with_lookup_regex(mut self, pattern: impl Into<String>) -> Self {
        self.lookup_regex = Some(pattern.into());
        self
    }

    /// Sets the display name.
    pub fn with_search_engine_name(mut self, name: impl Into<String>) -> Self {
        self.search_engine_name = Some(name.into());
        self
    }

    /// Sets the request timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Returns the display name, falling back to the provider id.
    pub fn display_name(&self) -> &str {
        self.search_engine_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }

    /// Returns the extraction pattern if one is configured.
    pub fn lookup_pattern(&self) -> Option<&str> {
        self.lookup_regex.as_deref().filter(|p| !p.is_empty())
    }

    /// Returns the positive result-count hint, if any.
    pub fn result_limit(&self) -> Option<u32> {
        self.max_search_results.filter(|n| *n > 0)
    }

    /// Parses the base address.
    pub fn base_url(&self) -> Result<Url> {
        let address = self
            .base_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or_else(|| {
                RankError::InvalidArgument(format!(
                    "base address not configured for provider '{}'",
                    self.id
                ))
            })?;
        Ok(Url::parse(address)?)
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
