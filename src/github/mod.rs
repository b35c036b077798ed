// src/github/mod.rs
// =============================================================================
// This module gets repository data out of GitHub.
//
// Submodules:
// - trending: scrapes github.com/trending into RepositorySummary records
// - search: calls the repository search API and builds derived queries
// - number: turns "1.2k" / "3,400" style counts into integers
// - repo: the shared record type and its helpers
//
// Both fetchers swallow their own failures and return empty lists, so the
// tool layer only ever sees "some results" or "no results".
// =============================================================================

mod number;
mod repo;
mod search;
mod trending;

pub use repo::{RepositorySummary, TrendingWindow, UnknownWindow};
pub use search::{hot_repos_query, summarize, SearchApiClient};
pub use trending::TrendingPageFetcher;
