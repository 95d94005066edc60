//! Application settings loaded from an `appsettings.json` style document.
//!
//! The JSON nesting mirrors the colon-separated keys used by the settings
//! file, e.g. `HttpClientSettings:GoogleClient:LookupRegex` is
//! `{"HttpClientSettings": {"GoogleClient": {"LookupRegex": ...}}}`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ProviderConfig, RankError, Result};

/// User agent sent when the settings do not provide one.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0.3987.106 Safari/537.36";

const DEFAULT_BROWSER: &str = "Chrome";

/// Values shared by every provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchDefaults {
    /// Path appended to the target host before matching result links.
    #[serde(default)]
    pub directory_path: Option<String>,
}

/// Root settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppSettings {
    /// Identifier of the active provider.
    #[serde(default)]
    pub selected_http_client: Option<String>,
    /// Key into `user_agents`; defaults to `Chrome`.
    #[serde(default)]
    pub selected_user_agent: Option<String>,
    /// Per-provider settings keyed by provider id.
    #[serde(default)]
    pub http_client_settings: BTreeMap<String, ProviderConfig>,
    #[serde(default)]
    pub search_defaults: SearchDefaults,
    /// User-agent strings keyed by browser name.
    #[serde(default)]
    pub user_agents: BTreeMap<String, String>,
}

impl AppSettings {
    /// Creates empty settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| RankError::Config(e.to_string()))
    }

    /// Reads settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| RankError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Selects the active provider.
    pub fn with_selected_provider(mut self, id: impl Into<String>) -> Self {
        self.selected_http_client = Some(id.into());
        self
    }

    /// Adds or replaces a provider, keyed by its id.
    pub fn with_provider(mut self, provider: ProviderConfig) -> Self {
        self.http_client_settings
            .insert(provider.id.clone(), provider);
        self
    }

    /// Sets the directory path appended to the target host when matching.
    pub fn with_directory_path(mut self, path: impl Into<String>) -> Self {
        self.search_defaults.directory_path = Some(path.into());
        self
    }

    /// Registers a user agent for the given browser name.
    pub fn with_user_agent(mut self, browser: impl Into<String>, agent: impl Into<String>) -> Self {
        self.user_agents.insert(browser.into(), agent.into());
        self
    }

    /// Returns the active provider id.
    pub fn selected_provider(&self) -> Result<&str> {
        self.selected_http_client
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                RankError::InvalidArgument(
                    "a search provider must be selected in the configuration".to_string(),
                )
            })
    }

    /// Resolves the settings of the active provider.
    ///
    /// A selected provider without a `HttpClientSettings` entry resolves to
    /// an empty configuration; callers then fail on the specific value they
    /// need (base address, lookup pattern).
    pub fn active_provider(&self) -> Result<ProviderConfig> {
        let id = self.selected_provider()?;
        let mut provider = self
            .http_client_settings
            .get(id)
            .cloned()
            .unwrap_or_default();
        provider.id = id.to_string();
        Ok(provider)
    }

    /// Returns every configured provider with its id filled in.
    pub fn providers(&self) -> Vec<ProviderConfig> {
        self.http_client_settings
            .iter()
            .map(|(id, provider)| ProviderConfig {
                id: id.clone(),
                ..provider.clone()
            })
            .collect()
    }

    /// Returns the configured directory path, if non-empty.
    pub fn directory_path(&self) -> Option<&str> {
        self.search_defaults
            .directory_path
            .as_deref()
            .filter(|p| !p.is_empty())
    }

    /// Returns the outbound user agent.
    pub fn user_agent(&self) -> &str {
        let browser = self
            .selected_user_agent
            .as_deref()
            .unwrap_or(DEFAULT_BROWSER);
        self.user_agents
            .get(browser)
            .map(String::as_str)
            .filter(|agent| !agent.is_empty())
            .unwrap_or(DEFAULT_USER_AGENT)
    }
}
