//! Results page fetcher abstraction.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{RankError, Result};

/// Builds the provider-relative search path for the given terms.
///
/// Produces `search?q=<encoded terms>`, followed by `&num=<N>` when a
/// positive result-count hint is given.
pub fn build_query(search_terms: &str, max_search_results: Option<u32>) -> Result<String> {
    let terms = search_terms.trim();
    if terms.is_empty() {
        return Err(RankError::InvalidArgument(
            "search terms must be provided".to_string(),
        ));
    }

    let mut query = format!("search?q={}", urlencoding::encode(terms));
    if let Some(num) = max_search_results.filter(|n| *n > 0) {
        query.push_str(&format!("&num={}", num));
    }
    Ok(query)
}

/// Trait for retrieving the raw results page of a search.
///
/// Provider, user-agent and timeout are fixed at construction time;
/// `fetch` is a simple terms-in, page-text-out interface.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the results page for the given search terms.
    async fn fetch(&self, search_terms: &str) -> Result<String>;

    /// Like [`fetch`](Self::fetch), but gives up with [`RankError::Cancelled`]
    /// as soon as `cancel` fires. The in-flight request is dropped.
    async fn fetch_cancellable(
        &self,
        search_terms: &str,
        cancel: &CancellationToken,
    ) -> Result<String> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RankError::Cancelled),
            page = self.fetch(search_terms) => page,
        }
    }
}
