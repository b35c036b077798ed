// src/github/trending.rs
// =============================================================================
// This module scrapes the public trending listing at github.com/trending.
//
// Strategy:
// - Build the listing URL for an optional language and a time window
// - Download the page with a browser User-Agent and a fixed timeout
// - Parse it into a DOM with `scraper` and walk every repository row
// - Turn each row into a RepositorySummary, or a RowSkip saying why not
//
// Failure policy:
// - Network errors, timeouts and non-2xx answers give an empty list
// - One malformed row is skipped; the rest of the page is still returned
//
// Page layout this traversal relies on (one row per repository):
//
//   article.Box-row
//     h2 > a[href="/owner/repo"]                       repository link
//     p                                                description
//     span[itemprop="programmingLanguage"]             language
//     a[href*="stargazers"]                            total stars
//     a[href*="forks"]                                 total forks
//     span.d-inline-block.float-sm-right               "1,203 stars today"
// =============================================================================

use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use super::number::normalize_count;
use super::repo::{
    assign_ranks, repository_url, split_full_name, RepositorySummary, RowSkip, TrendingWindow,
    UNKNOWN_LANGUAGE,
};
use crate::config::Config;

/// Fetches and parses the trending listing.
#[derive(Debug, Clone)]
pub struct TrendingPageFetcher {
    client: Client,
    base_url: String,
}

impl TrendingPageFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.browser_user_agent.as_str())
            .build()
            .context("failed to build HTTP client for the trending page")?;

        Ok(Self {
            client,
            base_url: config.trending_url.clone(),
        })
    }

    // Builds the listing URL
    //
    // Examples:
    //   (None, Daily)          -> https://github.com/trending?since=daily
    //   (Some("rust"), Weekly) -> https://github.com/trending/rust?since=weekly
    pub fn trending_url(&self, language: Option<&str>, window: TrendingWindow) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| anyhow!("Invalid trending URL '{}': {}", self.base_url, e))?;

        if let Some(language) = language.map(str::trim).filter(|l| !l.is_empty()) {
            url.path_segments_mut()
                .map_err(|_| anyhow!("Trending URL cannot take a path: {}", self.base_url))?
                .pop_if_empty()
                .push(language);
        }

        url.query_pairs_mut().append_pair("since", window.as_str());
        Ok(url)
    }

    /// Returns the repositories on the trending page, in page order.
    ///
    /// Never fails: any network or parse problem is logged and gives an
    /// empty list.
    pub async fn fetch(&self, language: Option<&str>, window: TrendingWindow) -> Vec<RepositorySummary> {
        match self.try_fetch(language, window).await {
            Ok(repos) => {
                info!(count = repos.len(), %window, "fetched trending repositories");
                repos
            }
            Err(e) => {
                warn!("could not fetch trending repositories: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, language: Option<&str>, window: TrendingWindow) -> Result<Vec<RepositorySummary>> {
        let url = self.trending_url(language, window)?;
        debug!(%url, "requesting trending page");

        let html = fetch_page(&self.client, url.as_str()).await?;
        let outcomes = parse_trending_page(&html, window)?;
        Ok(collect_rows(outcomes))
    }
}

// Downloads a page and returns its body
//
// Non-2xx answers are errors, just like transport failures
async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {} from {}", response.status(), url));
    }

    let html = response.text().await?;
    Ok(html)
}

// CSS selectors for one trending row, compiled once per page
struct RowSelectors {
    row: Selector,
    link: Selector,
    description: Selector,
    language: Selector,
    stars: Selector,
    forks: Selector,
    stars_period: Selector,
}

impl RowSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            row: selector("article.Box-row")?,
            link: selector("h2 a")?,
            description: selector("p")?,
            language: selector(r#"span[itemprop="programmingLanguage"]"#)?,
            stars: selector(r#"a[href*="stargazers"]"#)?,
            forks: selector(r#"a[href*="forks"]"#)?,
            stars_period: selector("span.d-inline-block.float-sm-right")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector '{}': {:?}", css, e))
}

/// Parses a trending page into one outcome per row, in document order.
///
/// Ranks are left at 0 here; [`collect_rows`] numbers the rows that survive.
pub fn parse_trending_page(
    html: &str,
    window: TrendingWindow,
) -> Result<Vec<Result<RepositorySummary, RowSkip>>> {
    let document = Html::parse_document(html);
    let selectors = RowSelectors::new()?;

    Ok(document
        .select(&selectors.row)
        .map(|row| parse_row(row, &selectors, window))
        .collect())
}

/// Keeps the parsed rows, logs the skipped ones and ranks the survivors 1..n.
pub fn collect_rows(outcomes: Vec<Result<RepositorySummary, RowSkip>>) -> Vec<RepositorySummary> {
    let mut repos = Vec::with_capacity(outcomes.len());

    for (position, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(repo) => repos.push(repo),
            Err(reason) => debug!(row = position + 1, %reason, "skipping trending row"),
        }
    }

    assign_ranks(&mut repos);
    repos
}

fn parse_row(
    row: ElementRef<'_>,
    selectors: &RowSelectors,
    window: TrendingWindow,
) -> Result<RepositorySummary, RowSkip> {
    let href = row
        .select(&selectors.link)
        .next()
        .and_then(|link| link.value().attr("href"))
        .ok_or(RowSkip::MissingLink)?;

    let (author, name) =
        split_full_name(href).ok_or_else(|| RowSkip::MalformedPath(href.to_string()))?;

    let description = first_text(row, &selectors.description).unwrap_or_default();
    let language =
        first_text(row, &selectors.language).unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());

    let stars = first_text(row, &selectors.stars).unwrap_or_else(|| "0".to_string());
    let forks = first_text(row, &selectors.forks).unwrap_or_else(|| "0".to_string());

    // "1,203 stars today" -> "1,203"
    let stars_period =
        first_text(row, &selectors.stars_period).unwrap_or_else(|| "0 stars".to_string());
    let stars_period = stars_period.split_whitespace().next().unwrap_or("0");

    Ok(RepositorySummary {
        rank: 0,
        full_name: format!("{}/{}", author, name),
        url: repository_url(&author, &name),
        author,
        name,
        description,
        language,
        stars: normalize_count(&stars),
        forks: normalize_count(&forks),
        stars_period: Some(normalize_count(stars_period)),
        since: Some(window),
        created_at: None,
    })
}

// Trimmed text of the first element in `row` matching `selector`
fn first_text(row: ElementRef<'_>, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIXTURE: &str = include_str!("../../fixtures/trending_page.html");

    fn fetcher_for(server: &MockServer) -> TrendingPageFetcher {
        let config = Config {
            trending_url: format!("{}/trending", server.uri()),
            ..Config::default()
        };
        TrendingPageFetcher::new(&config).unwrap()
    }

    #[test]
    fn test_fixture_yields_three_ranked_rows() {
        let outcomes = parse_trending_page(FIXTURE, TrendingWindow::Daily).unwrap();
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[1], Err(RowSkip::MissingLink));

        let repos = collect_rows(outcomes);
        let names: Vec<_> = repos.iter().map(|r| r.full_name.as_str()).collect();
        let ranks: Vec<_> = repos.iter().map(|r| r.rank).collect();
        assert_eq!(names, vec!["tokio-rs/tokio", "astral-sh/uv", "someone/dotfiles"]);
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_row_fields_are_normalized() {
        let repos = collect_rows(parse_trending_page(FIXTURE, TrendingWindow::Daily).unwrap());

        let tokio = &repos[0];
        assert_eq!(tokio.author, "tokio-rs");
        assert_eq!(tokio.name, "tokio");
        assert_eq!(tokio.url, "https://github.com/tokio-rs/tokio");
        assert!(tokio.description.starts_with("A runtime for writing reliable"));
        assert_eq!(tokio.language, "Rust");
        assert_eq!(tokio.stars, 27_104);
        assert_eq!(tokio.forks, 2_497);
        assert_eq!(tokio.stars_period, Some(1_203));
        assert_eq!(tokio.since, Some(TrendingWindow::Daily));
        assert_eq!(tokio.created_at, None);

        assert_eq!(repos[1].stars, 45_300);
        assert_eq!(repos[1].stars_period, Some(312));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let repos = collect_rows(parse_trending_page(FIXTURE, TrendingWindow::Monthly).unwrap());

        let bare = &repos[2];
        assert_eq!(bare.description, "");
        assert_eq!(bare.language, "Unknown");
        assert_eq!(bare.stars, 88);
        assert_eq!(bare.forks, 0);
        assert_eq!(bare.stars_period, Some(0));
        assert_eq!(bare.since, Some(TrendingWindow::Monthly));
    }

    #[test]
    fn test_malformed_link_is_skipped_with_reason() {
        let html = r#"
            <article class="Box-row"><h2><a href="/sponsors">Sponsor</a></h2></article>
            <article class="Box-row"><h2><a href="/a/b/c">Deep</a></h2></article>
            <article class="Box-row"><h2><a href="/good/repo">Good</a></h2></article>
        "#;

        let outcomes = parse_trending_page(html, TrendingWindow::Daily).unwrap();
        assert_eq!(outcomes[0], Err(RowSkip::MalformedPath("/sponsors".to_string())));
        assert_eq!(outcomes[1], Err(RowSkip::MalformedPath("/a/b/c".to_string())));

        let repos = collect_rows(outcomes);
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].rank, 1);
        assert_eq!(repos[0].full_name, "good/repo");
    }

    #[test]
    fn test_page_without_rows_is_empty() {
        let repos = collect_rows(parse_trending_page("<html><body></body></html>", TrendingWindow::Daily).unwrap());
        assert!(repos.is_empty());
    }

    #[test]
    fn test_trending_url() {
        let fetcher = TrendingPageFetcher::new(&Config::default()).unwrap();

        let url = fetcher.trending_url(None, TrendingWindow::Daily).unwrap();
        assert_eq!(url.as_str(), "https://github.com/trending?since=daily");

        let url = fetcher.trending_url(Some("rust"), TrendingWindow::Weekly).unwrap();
        assert_eq!(url.as_str(), "https://github.com/trending/rust?since=weekly");

        let url = fetcher.trending_url(Some("  "), TrendingWindow::Monthly).unwrap();
        assert_eq!(url.as_str(), "https://github.com/trending?since=monthly");

        let url = fetcher.trending_url(Some("c#"), TrendingWindow::Daily).unwrap();
        assert_eq!(url.as_str(), "https://github.com/trending/c%23?since=daily");
    }

    #[tokio::test]
    async fn test_fetch_parses_served_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/trending/rust"))
            .and(query_param("since", "weekly"))
            .and(header("user-agent", crate::config::BROWSER_USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_string(FIXTURE))
            .expect(1)
            .mount(&server)
            .await;

        let repos = fetcher_for(&server).fetch(Some("rust"), TrendingWindow::Weekly).await;
        assert_eq!(repos.len(), 3);
        assert_eq!(repos[0].since, Some(TrendingWindow::Weekly));
    }

    #[tokio::test]
    async fn test_fetch_returns_empty_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/trending"))
            .respond_with(ResponseTemplate::new(503).set_body_string(FIXTURE))
            .mount(&server)
            .await;

        let repos = fetcher_for(&server).fetch(None, TrendingWindow::Daily).await;
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_returns_empty_on_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(FIXTURE)
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = Config {
            trending_url: format!("{}/trending", server.uri()),
            timeout: Duration::from_millis(100),
            ..Config::default()
        };
        let fetcher = TrendingPageFetcher::new(&config).unwrap();

        let repos = fetcher.fetch(None, TrendingWindow::Daily).await;
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_returns_empty_when_unreachable() {
        let config = Config {
            // Port 9 (discard) is not served locally
            trending_url: "http://127.0.0.1:9/trending".to_string(),
            timeout: Duration::from_millis(500),
            ..Config::default()
        };
        let fetcher = TrendingPageFetcher::new(&config).unwrap();

        let repos = fetcher.fetch(Some("go"), TrendingWindow::Daily).await;
        assert!(repos.is_empty());
    }
}
