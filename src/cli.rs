// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// One subcommand per tool (trending, search, hot) plus two for agent
// runtimes: `tools` lists the tool surface and `call` runs a tool by name
// with JSON arguments, exactly as an agent would.
//
// Global options (token, timeout, verbosity) end up in a Config that is
// handed to the Toolbox; nothing below main reads the environment itself.
// =============================================================================

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::github::TrendingWindow;

#[derive(Parser, Debug)]
#[command(
    name = "trend-scout",
    version,
    about = "Discover trending, hot and searched GitHub repositories",
    long_about = "trend-scout fetches GitHub's trending page and the repository search API \
                  and prints the results as text, JSON or cards. The same three tools can be \
                  listed and called by name for use from an agent runtime."
)]
pub struct Cli {
    /// GitHub token for the search API (raises the rate limit)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub github_token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, global = true)]
    pub timeout_secs: u64,

    /// Log debug output to stderr (TREND_SCOUT_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::default()
            .with_token(self.github_token.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show repositories on GitHub's trending page
    ///
    /// Example: trend-scout trending --language rust --since weekly
    Trending {
        /// Programming language filter; all languages when omitted
        #[arg(long, short)]
        language: Option<String>,

        /// Time window the trending list covers
        #[arg(long, value_enum, default_value_t = TrendingWindow::Daily)]
        since: TrendingWindow,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Search repositories by free text, most-starred first
    ///
    /// Example: trend-scout search "machine learning" --max-results 5
    Search {
        /// Search query (GitHub search syntax is allowed)
        query: String,

        /// Number of results, clamped into 1..=10
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        max_results: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the most-starred repositories created in the last few days
    ///
    /// Example: trend-scout hot --language rust --days 7
    Hot {
        /// Programming language filter; all languages when omitted
        #[arg(long, short)]
        language: Option<String>,

        /// Days to look back, clamped into 1..=30
        #[arg(long, default_value_t = 7, allow_negative_numbers = true)]
        days: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the tool descriptions and argument schemas as JSON
    Tools,

    /// Call a tool by name with JSON arguments
    ///
    /// Example: trend-scout call get_hot_repos --args '{"language": "go", "days": 3}'
    Call {
        /// Tool name (see `trend-scout tools`)
        tool: String,

        /// JSON object with the tool's arguments
        #[arg(long, default_value = "{}")]
        args: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// How a tool's result is printed. Text is the default.
#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputArgs {
    /// Print the structured result (text and records) as JSON
    #[arg(long, conflicts_with = "cards")]
    pub json: bool,

    /// Print the records as cards instead of the tool text
    #[arg(long)]
    pub cards: bool,
}
