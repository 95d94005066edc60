//! # search-rank
//!
//! Reports the position(s) at which a site appears on a search engine's
//! results page.
//!
//! A check runs in two steps:
//!
//! - fetch one results page from the configured provider
//! - scan it with the provider's lookup regex and record the 1-based
//!   ordinal of every match whose link contains the target host
//!
//! Providers, lookup patterns and the user agent come from an
//! `appsettings.json` style document (see [`AppSettings`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use search_rank::{AppSettings, RankChecker, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = AppSettings::from_file("appsettings.json")?;
//!     let checker = RankChecker::from_settings(&settings)?;
//!
//!     let request = SearchRequest::new("online title search", "https://www.infotrack.com.au")?;
//!     let report = checker.check(&request).await?;
//!
//!     println!("{}: {}", report.provider, report.rank_string());
//!     Ok(())
//! }
//! ```

mod calculator;
mod checker;
mod error;
mod provider;
mod ranks;
mod request;
mod settings;

pub mod fetcher;
pub mod fetcher_http;

pub use calculator::{extract_ranks, RankCalculator};
pub use checker::RankChecker;
pub use error::{RankError, Result};
pub use provider::ProviderConfig;
pub use ranks::{RankReport, Ranks};
pub use request::SearchRequest;
pub use settings::{AppSettings, SearchDefaults, DEFAULT_USER_AGENT};
