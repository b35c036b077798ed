// src/github/search.rs
// =============================================================================
// This module talks to the GitHub repository search API:
//
//   GET /search/repositories?q=<query>&sort=<field>&order=desc&per_page=<n>
//
// Unlike the trending page this is a JSON API, so we send a proper
// User-Agent (GitHub rejects requests without one) and, when configured, a
// token that raises the rate limit.
//
// Failure policy matches the trending scraper: transport errors, non-2xx
// answers and bodies without an `items` array all give an empty list. Items
// whose JSON shape is off are skipped one by one.
// =============================================================================

use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDate};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::repo::{split_full_name, RepositorySummary, RowSkip, UNKNOWN_LANGUAGE};
use crate::config::Config;

/// GitHub caps `per_page` at 100.
pub const MAX_PER_PAGE: u32 = 100;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default)]
    pub login: String,
}

/// One raw item from the search response.
///
/// Only the fields the tools use are read; anything GitHub leaves null or
/// out falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub owner: Option<Owner>,
}

impl SearchItem {
    /// Converts the raw item into the shared record at the given rank.
    pub fn to_summary(&self, rank: usize) -> Result<RepositorySummary, RowSkip> {
        let (first_segment, second_segment) = split_full_name(&self.full_name)
            .ok_or_else(|| RowSkip::MalformedFullName(self.full_name.clone()))?;

        let author = self
            .owner
            .as_ref()
            .map(|owner| owner.login.clone())
            .filter(|login| !login.is_empty())
            .unwrap_or(first_segment);
        let name = if self.name.is_empty() {
            second_segment
        } else {
            self.name.clone()
        };

        Ok(RepositorySummary {
            rank,
            full_name: format!("{}/{}", author, name),
            url: self.html_url.clone(),
            author,
            name,
            description: self.description.clone().unwrap_or_default(),
            language: self
                .language
                .clone()
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
            stars: self.stargazers_count,
            forks: self.forks_count,
            stars_period: None,
            since: None,
            created_at: self.created_at.as_deref().map(creation_date),
        })
    }
}

// "2024-05-01T12:34:56Z" -> "2024-05-01"
fn creation_date(timestamp: &str) -> String {
    timestamp.get(..10).unwrap_or(timestamp).to_string()
}

/// Converts raw items into ranked summaries, dropping the ones that do not
/// name a repository.
pub fn summarize(items: &[SearchItem]) -> Vec<RepositorySummary> {
    let mut repos = Vec::with_capacity(items.len());

    for item in items {
        match item.to_summary(repos.len() + 1) {
            Ok(repo) => repos.push(repo),
            Err(reason) => debug!(%reason, "skipping search item"),
        }
    }

    repos
}

// The response envelope; `items` stays raw so one odd item cannot sink the
// whole page
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub struct SearchApiClient {
    client: Client,
    api_url: String,
}

impl SearchApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        if let Some(token) = &config.github_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("GitHub token is not a valid header value")?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client for the search API")?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Searches repositories, best match for `sort` first.
    ///
    /// `limit` is clamped into 1..=100. Never fails: any problem is logged
    /// and gives an empty list.
    pub async fn search(&self, query: &str, sort: &str, limit: u32) -> Vec<SearchItem> {
        match self.try_search(query, sort, limit).await {
            Ok(items) => {
                info!(count = items.len(), query, "searched repositories");
                items
            }
            Err(e) => {
                warn!("could not search repositories for '{}': {:#}", query, e);
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str, sort: &str, limit: u32) -> Result<Vec<SearchItem>> {
        let url = format!("{}/search/repositories", self.api_url);
        let per_page = limit.clamp(1, MAX_PER_PAGE).to_string();
        debug!(%url, query, sort, %per_page, "requesting repository search");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("sort", sort),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP {} from {}", response.status(), url));
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("search response is not the expected JSON")?;

        let Some(raw_items) = body.items else {
            return Err(anyhow!("search response has no 'items' field"));
        };

        Ok(raw_items
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    debug!(item = index + 1, error = %e, "skipping unreadable search item");
                    None
                }
            })
            .collect())
    }
}

/// Builds the "recently created" query used for hot repositories.
///
/// `days` is clamped into 1..=30 and counted back from `today`.
///
/// Example: `(Some("rust"), 7, 2024-05-08)` gives
/// `created:>2024-05-01 language:rust`.
pub fn hot_repos_query(language: Option<&str>, days: u32, today: NaiveDate) -> String {
    let days = days.clamp(1, 30);
    let threshold = today - Duration::days(i64::from(days));

    let mut query = format!("created:>{}", threshold.format("%Y-%m-%d"));
    if let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) {
        query.push_str(" language:");
        query.push_str(language);
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn client_for(server: &MockServer, token: Option<&str>) -> SearchApiClient {
        let config = Config {
            api_url: server.uri(),
            ..Config::default()
        }
        .with_token(token.map(str::to_string));
        SearchApiClient::new(&config).unwrap()
    }

    fn item(full_name: &str, stars: u64) -> serde_json::Value {
        let (owner, name) = full_name.split_once('/').unwrap();
        json!({
            "name": name,
            "full_name": full_name,
            "html_url": format!("https://github.com/{}", full_name),
            "description": "A repository",
            "language": "Rust",
            "stargazers_count": stars,
            "forks_count": 12,
            "created_at": "2024-05-01T12:34:56Z",
            "owner": { "login": owner },
            "topics": ["unused"]
        })
    }

    #[tokio::test]
    async fn test_search_returns_items_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "web framework"))
            .and(query_param("sort", "stars"))
            .and(query_param("order", "desc"))
            .and(query_param("per_page", "2"))
            .and(header("accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 2,
                "items": [item("tokio-rs/axum", 20_000), item("actix/actix-web", 21_000)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server, None).search("web framework", "stars", 2).await;
        let names: Vec<_> = items.iter().map(|i| i.full_name.as_str()).collect();
        assert_eq!(names, vec!["tokio-rs/axum", "actix/actix-web"]);
        assert_eq!(items[0].stargazers_count, 20_000);
        assert_eq!(items[1].owner.as_ref().unwrap().login, "actix");
    }

    #[tokio::test]
    async fn test_search_without_items_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Validation Failed"
            })))
            .mount(&server)
            .await;

        let items = client_for(&server, None).search("x", "stars", 5).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_search_error_status_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "message": "API rate limit exceeded",
                "items": [item("a/b", 1)]
            })))
            .mount(&server)
            .await;

        let items = client_for(&server, None).search("x", "stars", 5).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_search_non_json_body_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let items = client_for(&server, None).search("x", "stars", 5).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_search_skips_unreadable_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    item("a/first", 3),
                    { "full_name": "b/broken", "stargazers_count": -1 },
                    "not an object",
                    item("c/last", 1)
                ]
            })))
            .mount(&server)
            .await;

        let items = client_for(&server, None).search("x", "stars", 5).await;
        let names: Vec<_> = items.iter().map(|i| i.full_name.as_str()).collect();
        assert_eq!(names, vec!["a/first", "c/last"]);
    }

    #[tokio::test]
    async fn test_search_sends_token_and_clamps_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("authorization", "Bearer ghp_secret"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server, Some("ghp_secret"))
            .search("x", "stars", 500)
            .await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_token_sends_no_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("per_page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        client_for(&server, None).search("x", "updated", 0).await;

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
        assert!(requests[0].headers.contains_key("user-agent"));
    }

    #[test]
    fn test_item_defaults_for_nulls() {
        let item: SearchItem = serde_json::from_value(json!({
            "full_name": "someone/thing",
            "html_url": "https://github.com/someone/thing",
            "description": null,
            "language": null,
            "stargazers_count": 4,
            "forks_count": 0
        }))
        .unwrap();

        let repo = item.to_summary(3).unwrap();
        assert_eq!(repo.rank, 3);
        assert_eq!(repo.author, "someone");
        assert_eq!(repo.name, "thing");
        assert_eq!(repo.description, "");
        assert_eq!(repo.language, "Unknown");
        assert_eq!(repo.created_at, None);
        assert_eq!(repo.stars_period, None);
    }

    #[test]
    fn test_summarize_ranks_readable_items() {
        let items: Vec<SearchItem> = vec![
            serde_json::from_value(item("a/one", 5)).unwrap(),
            SearchItem {
                full_name: "no-slash".to_string(),
                ..SearchItem::default()
            },
            serde_json::from_value(item("b/two", 2)).unwrap(),
        ];

        let repos = summarize(&items);
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].rank, 1);
        assert_eq!(repos[1].rank, 2);
        assert_eq!(repos[1].full_name, "b/two");
        assert_eq!(repos[0].created_at.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_hot_query_with_language() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
        assert_eq!(
            hot_repos_query(Some("rust"), 7, today),
            "created:>2024-05-01 language:rust"
        );
    }

    #[test]
    fn test_hot_query_relative_to_today() {
        let today = chrono::Local::now().date_naive();
        let expected = (today - Duration::days(7)).format("%Y-%m-%d").to_string();

        let query = hot_repos_query(Some("rust"), 7, today);
        assert!(query.contains(&format!("created:>{}", expected)));
        assert!(query.contains("language:rust"));
    }

    #[test]
    fn test_hot_query_clamps_days_and_skips_blank_language() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        assert_eq!(hot_repos_query(None, 0, today), "created:>2024-03-30");
        assert_eq!(hot_repos_query(Some(""), 90, today), "created:>2024-03-01");
    }
}
