// src/github/repo.rs
// =============================================================================
// The normalized repository record shared by the trending scraper and the
// search client, plus the small types that travel with it.
//
// Both acquisition paths produce a RepositorySummary so the tool layer can
// format and render results without caring where they came from.
// =============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL used to build each repository's link.
pub const GITHUB_WEB_URL: &str = "https://github.com";

/// Language label used when a repository does not report one.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// The time range a trending listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TrendingWindow {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl TrendingWindow {
    /// The value GitHub expects in `?since=`.
    pub fn as_str(self) -> &'static str {
        match self {
            TrendingWindow::Daily => "daily",
            TrendingWindow::Weekly => "weekly",
            TrendingWindow::Monthly => "monthly",
        }
    }

    /// Capitalized label used in headers ("Daily").
    pub fn label(self) -> &'static str {
        match self {
            TrendingWindow::Daily => "Daily",
            TrendingWindow::Weekly => "Weekly",
            TrendingWindow::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for TrendingWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown time period '{0}' (expected daily, weekly or monthly)")]
pub struct UnknownWindow(pub String);

impl FromStr for TrendingWindow {
    type Err = UnknownWindow;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(TrendingWindow::Daily),
            "weekly" => Ok(TrendingWindow::Weekly),
            "monthly" => Ok(TrendingWindow::Monthly),
            _ => Err(UnknownWindow(s.to_string())),
        }
    }
}

/// One repository, normalized from either the trending page or the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// 1-based position in the returned list
    pub rank: usize,
    pub author: String,
    pub name: String,
    /// Always `author/name`
    pub full_name: String,
    pub url: String,
    /// May be empty
    pub description: String,
    /// Primary language, or "Unknown"
    pub language: String,
    pub stars: u64,
    pub forks: u64,
    /// Stars gained within the trending window (trending only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars_period: Option<u64>,
    /// Trending window the record came from (trending only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<TrendingWindow>,
    /// Creation date as YYYY-MM-DD (search only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Why a single trending row or search item was left out of the results.
///
/// A skip never aborts the fetch; it is logged and the next row is read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowSkip {
    #[error("row has no repository link")]
    MissingLink,

    #[error("repository link '{0}' is not an author/name path")]
    MalformedPath(String),

    #[error("full name '{0}' is not an author/name pair")]
    MalformedFullName(String),
}

// Splits "owner/repo" style text into its two segments.
//
// Empty segments are discarded first, so "/owner/repo/" and "owner//repo"
// both work; anything that does not leave exactly two segments is None.
pub fn split_full_name(path: &str) -> Option<(String, String)> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [author, name] => Some((author.to_string(), name.to_string())),
        _ => None,
    }
}

/// Link to a repository's page on github.com.
pub fn repository_url(author: &str, name: &str) -> String {
    format!("{}/{}/{}", GITHUB_WEB_URL, author, name)
}

/// Gives 1-based ranks to the records in their current order.
pub fn assign_ranks(repos: &mut [RepositorySummary]) {
    for (index, repo) in repos.iter_mut().enumerate() {
        repo.rank = index + 1;
    }
}
