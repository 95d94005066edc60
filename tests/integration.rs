//! Integration tests for the fetch-and-rank pipeline against a local HTTP server.
//!
//! The provider is faked with wiremock so the tests need no network access.

use search_rank::fetcher::PageFetcher;
use search_rank::fetcher_http::HttpFetcher;
use search_rank::{extract_ranks, AppSettings, RankChecker, RankError, SearchRequest};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GOOGLE_LOOKUP: &str = r#"(<div class="r"><a href="(.*?)">)"#;

fn results_page(links: &[&str]) -> String {
    links
        .iter()
        .map(|link| format!(r#"<div class="r"><a href="{}">Test Dummy Data</a></div>"#, link))
        .collect()
}

/// Builds settings the way an `appsettings.json` on disk would look.
fn settings_for(base_address: &str, extra: &str) -> AppSettings {
    let json = format!(
        r#"{{
            "SelectedHttpClient": "GoogleClient",
            "HttpClientSettings": {{
                "GoogleClient": {{
                    "BaseAddress": "{base}",
                    "MaxSearchResults": "100",
                    "LookupRegex": {lookup},
                    "SearchEngineName": "Google"
                }}
            }},
            "UserAgents": {{ "Chrome": "integration-test-agent" }}
            {extra}
        }}"#,
        base = base_address,
        lookup = serde_json::to_string(GOOGLE_LOOKUP).unwrap(),
        extra = extra,
    );
    AppSettings::from_json_str(&json).unwrap()
}

mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_check_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "online title search"))
            .and(query_param("num", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
                "http://www.infotrack.com.au",
                "http://www.xyz.com.au",
                "http://www.infotrack.com.au",
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let settings = settings_for(&server.uri(), "");
        let checker = RankChecker::from_settings(&settings).unwrap();
        let request = SearchRequest::new("online title search", "http://www.infotrack.com.au").unwrap();

        let report = checker.check(&request).await.unwrap();
        assert_eq!(report.rank_string(), "1,3");
        assert_eq!(report.provider, "Google");
    }

    #[tokio::test]
    async fn test_check_with_directory_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
                "http://www.infotrack.com.au/blah/blah",
                "http://www.infotrack.com.au/doh/blah",
            ])))
            .mount(&server)
            .await;

        let settings = settings_for(
            &server.uri(),
            r#", "SearchDefaults": { "DirectoryPath": "/blah/blah" }"#,
        );
        let checker = RankChecker::from_settings(&settings).unwrap();
        let request = SearchRequest::new("title search", "http://www.infotrack.com.au").unwrap();

        let report = checker.check(&request).await.unwrap();
        assert_eq!(report.rank_string(), "1");
    }

    #[tokio::test]
    async fn test_check_site_absent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(results_page(&["http://www.xyz.com.au"])),
            )
            .mount(&server)
            .await;

        let checker = RankChecker::from_settings(&settings_for(&server.uri(), "")).unwrap();
        let request = SearchRequest::new("title search", "http://www.infotrack.com.au").unwrap();

        let report = checker.check(&request).await.unwrap();
        assert_eq!(report.rank_string(), "0");
    }

    #[tokio::test]
    async fn test_check_non_success_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_string(results_page(&["http://www.infotrack.com.au"])),
            )
            .mount(&server)
            .await;

        let checker = RankChecker::from_settings(&settings_for(&server.uri(), "")).unwrap();
        let request = SearchRequest::new("title search", "http://www.infotrack.com.au").unwrap();

        let err = checker.check(&request).await.unwrap_err();
        assert!(matches!(err, RankError::Transport(_)));
        assert_eq!(err.status().map(|s| s.as_u16()), Some(429));
    }
}

mod fetch_then_extract_tests {
    use super::*;

    #[tokio::test]
    async fn test_separate_fetch_and_extract() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(results_page(&[
                "http://www.abc.net.au",
                "https://www.infotrack.com.au/",
            ])))
            .mount(&server)
            .await;

        let settings = settings_for(&server.uri(), "");
        let fetcher = HttpFetcher::from_settings(&settings).unwrap();
        let page = fetcher.fetch("online title search").await.unwrap();

        let target = url::Url::parse("https://www.infotrack.com.au").unwrap();
        assert_eq!(extract_ranks(&page, &target, &settings).unwrap(), "2");
    }

    #[tokio::test]
    async fn test_fetch_without_selected_provider() {
        let settings = settings_for("http://127.0.0.1:1", "").with_selected_provider("");
        let result = HttpFetcher::from_settings(&settings);
        assert!(matches!(result, Err(RankError::InvalidArgument(_))));
    }

    #[test]
    fn test_sample_settings_file_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/appsettings.json");
        let settings = AppSettings::from_file(path).unwrap();
        let provider = settings.active_provider().unwrap();
        assert!(provider.lookup_pattern().is_some());
        assert!(provider.base_url().is_ok());
        assert!(RankChecker::from_settings(&settings).is_ok());
    }
}
