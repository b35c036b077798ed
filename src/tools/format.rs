// src/tools/format.rs
// =============================================================================
// This module renders repository lists as the text blocks the tools return.
//
// Everything here is pure: same input, same string. That keeps the output
// stable for the agent that reads it and easy to pin down in tests.
//
// Shared rules:
// - At most MAX_DISPLAYED entries are shown
// - Descriptions longer than DESCRIPTION_LIMIT characters are cut and get "..."
// - Star and fork totals use ',' thousands separators
// =============================================================================

use std::fmt::Write;

use crate::github::{RepositorySummary, TrendingWindow};

/// Entries shown per result block.
pub const MAX_DISPLAYED: usize = 10;

/// Longest description shown in a tool block before it is cut.
pub const DESCRIPTION_LIMIT: usize = 150;

/// Longest description shown on a card.
pub const CARD_DESCRIPTION_LIMIT: usize = 200;

// Cuts `text` to `limit` characters and appends "..." when anything was cut
//
// Counts characters, not bytes, so multi-byte text is never split mid-char
pub fn truncate_description(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// 1234567 -> "1,234,567"
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

fn language_or<'a>(language: Option<&'a str>, fallback: &'a str) -> &'a str {
    language.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(fallback)
}

/// Text block for `get_trending_repos`.
pub fn format_trending(
    repos: &[RepositorySummary],
    language: Option<&str>,
    window: TrendingWindow,
) -> String {
    if repos.is_empty() {
        return format!(
            "No trending repositories found for {} ({}).",
            language_or(language, "all languages"),
            window
        );
    }

    let mut out = String::new();
    out.push_str("📈 **Trending GitHub Repositories**\n");
    let _ = writeln!(
        out,
        "Language: {} | Period: {}\n",
        language_or(language, "All"),
        window.label()
    );

    for repo in repos.iter().take(MAX_DISPLAYED) {
        let _ = writeln!(out, "**#{} {}**", repo.rank, repo.full_name);
        let _ = writeln!(out, "   🔗 {}", repo.url);
        if !repo.description.is_empty() {
            let _ = writeln!(out, "   📝 {}", truncate_description(&repo.description, DESCRIPTION_LIMIT));
        }
        let _ = writeln!(
            out,
            "   💻 {} | ⭐ {} stars (+{} {})",
            repo.language,
            thousands(repo.stars),
            repo.stars_period.unwrap_or(0),
            window
        );
        let _ = writeln!(out, "   🔱 {} forks\n", thousands(repo.forks));
    }

    out
}

/// Text block for `search_repos`.
pub fn format_search(repos: &[RepositorySummary], query: &str) -> String {
    if repos.is_empty() {
        return format!("No repositories found matching: '{}'", query);
    }

    let mut out = String::new();
    let _ = writeln!(out, "🔍 **Search Results for '{}'**\n", query);

    for repo in repos.iter().take(MAX_DISPLAYED) {
        write_search_heading(&mut out, repo);
        let _ = writeln!(
            out,
            "   💻 {} | ⭐ {} | 🔱 {}\n",
            repo.language,
            thousands(repo.stars),
            thousands(repo.forks)
        );
    }

    out
}

/// Text block for `get_hot_repos`. `days` is the already-clamped window.
pub fn format_hot(repos: &[RepositorySummary], language: Option<&str>, days: u32) -> String {
    if repos.is_empty() {
        return format!(
            "No hot repositories found for {} in last {} days.",
            language_or(language, "all languages"),
            days
        );
    }

    let mut out = String::new();
    out.push_str("🔥 **Hot New Repositories**\n");
    let _ = writeln!(
        out,
        "Created in last {} days | Language: {}\n",
        days,
        language_or(language, "All")
    );

    for repo in repos.iter().take(MAX_DISPLAYED) {
        write_search_heading(&mut out, repo);
        let _ = writeln!(out, "   💻 {} | ⭐ {}", repo.language, thousands(repo.stars));
        let _ = writeln!(
            out,
            "   📅 Created: {}\n",
            repo.created_at.as_deref().unwrap_or("unknown")
        );
    }

    out
}

// Name, link and description lines shared by the search and hot blocks
fn write_search_heading(out: &mut String, repo: &RepositorySummary) {
    let _ = writeln!(out, "**{}. {}**", repo.rank, repo.full_name);
    let _ = writeln!(out, "   🔗 {}", repo.url);

    let description = if repo.description.is_empty() {
        "No description".to_string()
    } else {
        truncate_description(&repo.description, DESCRIPTION_LIMIT)
    };
    let _ = writeln!(out, "   📝 {}", description);
}

/// Card view of a result list, one card per repository.
pub fn render_cards(repos: &[RepositorySummary]) -> String {
    let mut out = String::from("📊 GitHub Results\n\n");

    for repo in repos.iter().take(MAX_DISPLAYED) {
        let _ = writeln!(out, "#{} {}", repo.rank, repo.full_name);

        let description: String = if repo.description.is_empty() {
            "No description available".to_string()
        } else {
            repo.description.chars().take(CARD_DESCRIPTION_LIMIT).collect()
        };
        let _ = writeln!(out, "{}", description);

        let mut stats = vec![
            format!("⭐ {} stars", thousands(repo.stars)),
            format!("🔱 {} forks", thousands(repo.forks)),
            format!("💻 {}", repo.language),
        ];
        if let Some(created_at) = &repo.created_at {
            stats.push(format!("📅 Created: {}", created_at));
        }
        let _ = writeln!(out, "{}", stats.join(" | "));
        let _ = writeln!(out, "🔗 {}\n", repo.url);
    }

    out
}
