// src/tools/mod.rs
// =============================================================================
// This module is the tool surface the rest of the world talks to.
//
// Submodules:
// - toolbox: the three tools and the by-name dispatcher
// - schema: tool names, descriptions and argument schemas
// - format: pure text rendering of result lists
// =============================================================================

mod format;
mod schema;
mod toolbox;

pub use format::render_cards;
pub use schema::tool_specs;
pub use toolbox::{ToolOutput, Toolbox};
