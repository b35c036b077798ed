// src/tools/toolbox.rs
// =============================================================================
// The three tools an agent can call, bundled with the fetchers they share.
//
// A Toolbox is built once from a Config and then passed to whoever needs it
// (the CLI today, an agent runtime adapter tomorrow). Each tool:
//   1. clamps or validates its arguments
//   2. makes exactly one network call through a fetcher
//   3. returns the formatted text plus the structured list behind it
//
// Fetch failures never surface here; they arrive as empty lists and become
// the tool's "no results" message.
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use super::format::{format_hot, format_search, format_trending};
use super::schema::{HotArgs, SearchArgs, TrendingArgs, HOT_TOOL, SEARCH_TOOL, TRENDING_TOOL};
use crate::config::Config;
use crate::github::{
    hot_repos_query, summarize, RepositorySummary, SearchApiClient, TrendingPageFetcher,
    TrendingWindow, UnknownWindow,
};

/// Results fetched per hot-repos call.
const HOT_RESULTS: u32 = 10;

/// Which tool produced an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Trending,
    Search,
    Hot,
}

/// What a tool hands back: text for the agent, records for card rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ToolOutput {
    pub kind: ResultKind,
    pub text: String,
    pub repos: Vec<RepositorySummary>,
}

impl ToolOutput {
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    InvalidTimePeriod(#[from] UnknownWindow),
}

#[derive(Debug, Clone)]
pub struct Toolbox {
    trending: TrendingPageFetcher,
    search: SearchApiClient,
}

impl Toolbox {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            trending: TrendingPageFetcher::new(config)?,
            search: SearchApiClient::new(config)?,
        })
    }

    /// Trending repositories for a language ("" for all) and window.
    #[instrument(skip(self))]
    pub async fn get_trending_repos(&self, language: &str, window: TrendingWindow) -> ToolOutput {
        let language = non_empty(language);
        let repos = self.trending.fetch(language, window).await;

        ToolOutput {
            kind: ResultKind::Trending,
            text: format_trending(&repos, language, window),
            repos,
        }
    }

    /// Free-text repository search; `max_results` is clamped into 1..=10.
    #[instrument(skip(self))]
    pub async fn search_repos(&self, query: &str, max_results: i64) -> ToolOutput {
        let limit = clamp_to(max_results, 1, 10);
        let items = self.search.search(query, "stars", limit).await;
        let repos = summarize(&items);

        ToolOutput {
            kind: ResultKind::Search,
            text: format_search(&repos, query),
            repos,
        }
    }

    /// Most-starred repositories created in the last `days` (clamped into
    /// 1..=30), optionally for one language.
    #[instrument(skip(self))]
    pub async fn get_hot_repos(&self, language: &str, days: i64) -> ToolOutput {
        let language = non_empty(language);
        let days = clamp_to(days, 1, 30);
        let today = chrono::Local::now().date_naive();
        let query = hot_repos_query(language, days, today);

        let items = self.search.search(&query, "stars", HOT_RESULTS).await;
        let repos = summarize(&items);

        ToolOutput {
            kind: ResultKind::Hot,
            text: format_hot(&repos, language, days),
            repos,
        }
    }

    /// Calls a tool by name with JSON arguments, the way an agent runtime
    /// would. `Value::Null` counts as "no arguments".
    pub async fn invoke(&self, name: &str, args: &Value) -> Result<ToolOutput, ToolError> {
        debug!(tool = name, %args, "invoking tool");
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args.clone()
        };

        match name {
            TRENDING_TOOL => {
                let args: TrendingArgs = parse_args(TRENDING_TOOL, args)?;
                let window: TrendingWindow = args.time_period.parse()?;
                Ok(self.get_trending_repos(&args.language, window).await)
            }
            SEARCH_TOOL => {
                let args: SearchArgs = parse_args(SEARCH_TOOL, args)?;
                Ok(self.search_repos(&args.query, args.max_results).await)
            }
            HOT_TOOL => {
                let args: HotArgs = parse_args(HOT_TOOL, args)?;
                Ok(self.get_hot_repos(&args.language, args.days).await)
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(tool: &'static str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|source| ToolError::InvalidArguments { tool, source })
}

fn non_empty(text: &str) -> Option<&str> {
    Some(text.trim()).filter(|t| !t.is_empty())
}

fn clamp_to(value: i64, min: u32, max: u32) -> u32 {
    // The clamp keeps the value inside u32, so the cast cannot truncate
    value.clamp(i64::from(min), i64::from(max)) as u32
}
