//! Search request representation.

use serde::Serialize;
use url::Url;

use crate::{RankError, Result};

/// One user-initiated rank check: what to search for and which site to look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    terms: String,
    target: Url,
}

impl SearchRequest {
    /// Creates a request from free-text terms and an absolute target URL.
    pub fn new(terms: impl Into<String>, target: &str) -> Result<Self> {
        let target = Url::parse(target.trim())
            .map_err(|e| RankError::InvalidArgument(format!("provided url is invalid: {}", e)))?;
        Self::with_url(terms, target)
    }

    /// Creates a request from an already parsed target URL.
    pub fn with_url(terms: impl Into<String>, target: Url) -> Result<Self> {
        let terms = terms.into().trim().to_string();
        if terms.is_empty() {
            return Err(RankError::InvalidArgument(
                "search terms must be provided".to_string(),
            ));
        }
        if target.host_str().map_or(true, str::is_empty) {
            return Err(RankError::InvalidArgument(format!(
                "provided url has no host: {}",
                target
            )));
        }
        Ok(Self { terms, target })
    }

    /// Returns the search terms.
    pub fn terms(&self) -> &str {
        &self.terms
    }

    /// Returns the target URL.
    pub fn target(&self) -> &Url {
        &self.target
    }
}
