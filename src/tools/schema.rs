// src/tools/schema.rs
// =============================================================================
// The tool surface an agent runtime sees: each tool's name, what it does, and
// a JSON-schema description of its arguments. The argument structs below are
// what `Toolbox::invoke` deserializes the runtime's JSON into.
// =============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const TRENDING_TOOL: &str = "get_trending_repos";
pub const SEARCH_TOOL: &str = "search_repos";
pub const HOT_TOOL: &str = "get_hot_repos";

/// Name, description and parameter schema of one tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Describes the three tools in the order an agent should consider them.
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: TRENDING_TOOL,
            description: "Get trending GitHub repositories.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "language": {
                        "type": "string",
                        "description": "Programming language filter (e.g. 'python', 'javascript', 'rust'). Leave empty for all languages."
                    },
                    "time_period": {
                        "type": "string",
                        "enum": ["daily", "weekly", "monthly"],
                        "description": "Time period - 'daily', 'weekly', or 'monthly'"
                    }
                },
                "required": []
            }),
        },
        ToolSpec {
            name: SEARCH_TOOL,
            description: "Search GitHub repositories using natural language.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (e.g. \"machine learning frameworks\", \"web development tools\")"
                    },
                    "max_results": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 10,
                        "description": "Maximum number of results (1-10)"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolSpec {
            name: HOT_TOOL,
            description: "Get hot new repositories created recently.",
            parameters: json!({
                "type": "object",
                "properties": {
                    "language": {
                        "type": "string",
                        "description": "Programming language filter. Leave empty for all languages."
                    },
                    "days": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 30,
                        "description": "Number of days to look back (1-30)"
                    }
                },
                "required": []
            }),
        },
    ]
}

fn default_time_period() -> String {
    "daily".to_string()
}

fn default_max_results() -> i64 {
    5
}

fn default_days() -> i64 {
    7
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct TrendingArgs {
    #[serde(default)]
    pub language: String,
    #[serde(default = "default_time_period")]
    pub time_period: String,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SearchArgs {
    pub query: String,
    #[serde(default = "default_max_results")]
    pub max_results: i64,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct HotArgs {
    #[serde(default)]
    pub language: String,
    #[serde(default = "default_days")]
    pub days: i64,
}
