//! HTTP-based results page fetcher using reqwest.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

use crate::fetcher::{build_query, PageFetcher};
use crate::{AppSettings, ProviderConfig, Result};

/// A page fetcher that issues one GET per search against the provider's
/// base address.
///
/// The underlying client is built once; its timeout and user agent apply to
/// every request and its connection pool is reused across searches.
pub struct HttpFetcher {
    client: Client,
    provider: ProviderConfig,
    base_url: Url,
}

impl HttpFetcher {
    /// Creates a fetcher for `provider`, sending `user_agent` on every request.
    pub fn new(provider: ProviderConfig, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(provider.timeout())
            .build()?;
        Self::with_client(provider, client)
    }

    /// Creates a fetcher with a custom reqwest client.
    pub fn with_client(provider: ProviderConfig, client: Client) -> Result<Self> {
        let base_url = provider.base_url()?;
        Ok(Self {
            client,
            provider,
            base_url,
        })
    }

    /// Creates a fetcher for the active provider in the settings.
    pub fn from_settings(settings: &AppSettings) -> Result<Self> {
        let provider = settings.active_provider()?;
        Self::new(provider, settings.user_agent())
    }

    /// Returns the provider this fetcher queries.
    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    /// Returns the absolute URL requested for the given terms.
    pub fn search_url(&self, search_terms: &str) -> Result<Url> {
        let query = build_query(search_terms, self.provider.result_limit())?;
        Ok(self.base_url.join(&query)?)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, search_terms: &str) -> Result<String> {
        let url = self.search_url(search_terms)?;
        debug!(provider = %self.provider.id, %url, "Fetching search results");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                error!(
                    provider = %self.provider.id,
                    status = ?e.status(),
                    "Search request failed: {}",
                    e
                );
                return Err(e.into());
            }
        };

        let page = response.text().await?;
        debug!(bytes = page.len(), "Received search results");
        Ok(page)
    }
}
