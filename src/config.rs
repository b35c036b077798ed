// src/config.rs
// =============================================================================
// Runtime configuration for the fetchers and the toolbox.
//
// Everything the network layer needs is carried here and handed to
// Toolbox::new at construction time. Nothing reads the environment directly;
// the CLI fills this in from its arguments (clap reads GITHUB_TOKEN for us).
// =============================================================================

use std::time::Duration;

/// Public trending listing.
pub const TRENDING_URL: &str = "https://github.com/trending";

/// GitHub REST API root.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The trending page serves reduced markup to unknown clients, so the
/// scraper presents itself as a desktop browser.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Clone)]
pub struct Config {
    /// Raises the search API rate limit when present
    pub github_token: Option<String>,
    pub timeout: Duration,
    pub trending_url: String,
    pub api_url: String,
    pub browser_user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            timeout: DEFAULT_TIMEOUT,
            trending_url: TRENDING_URL.to_string(),
            api_url: GITHUB_API_URL.to_string(),
            browser_user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    // Empty tokens (e.g. GITHUB_TOKEN="") count as no token at all
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.github_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
