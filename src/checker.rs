//! Rank check orchestration.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::fetcher::PageFetcher;
use crate::fetcher_http::HttpFetcher;
use crate::{AppSettings, RankCalculator, RankReport, Result, SearchRequest};

/// Fetches a results page and reports where the requested site ranks on it.
pub struct RankChecker {
    fetcher: Arc<dyn PageFetcher>,
    calculator: RankCalculator,
    provider_name: String,
}

impl RankChecker {
    /// Creates a checker from a fetcher and a calculator.
    pub fn new(fetcher: Arc<dyn PageFetcher>, calculator: RankCalculator) -> Self {
        Self {
            fetcher,
            calculator,
            provider_name: String::new(),
        }
    }

    /// Sets the provider name recorded in reports.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Creates a checker for the active provider in the settings.
    pub fn from_settings(settings: &AppSettings) -> Result<Self> {
        let fetcher = HttpFetcher::from_settings(settings)?;
        let calculator = RankCalculator::from_settings(settings)?;
        let name = fetcher.provider().display_name().to_string();
        Ok(Self::new(Arc::new(fetcher), calculator).with_provider_name(name))
    }

    /// Returns the provider name recorded in reports.
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Runs one rank check.
    pub async fn check(&self, request: &SearchRequest) -> Result<RankReport> {
        self.run(request, None).await
    }

    /// Runs one rank check, aborting when `cancel` fires.
    pub async fn check_cancellable(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<RankReport> {
        self.run(request, Some(cancel)).await
    }

    async fn run(
        &self,
        request: &SearchRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<RankReport> {
        let start = Instant::now();
        debug!(terms = request.terms(), url = %request.target(), "Checking rank");

        let page = match cancel {
            Some(cancel) => self.fetcher.fetch_cancellable(request.terms(), cancel).await?,
            None => self.fetcher.fetch(request.terms()).await?,
        };
        let ranks = self.calculator.ranks(&page, request.target())?;

        let report = RankReport {
            terms: request.terms().to_string(),
            url: request.target().to_string(),
            provider: self.provider_name.clone(),
            ranks,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            provider = %report.provider,
            ranks = %report.ranks,
            duration_ms = report.duration_ms,
            "Rank check complete"
        );
        Ok(report)
    }
}
