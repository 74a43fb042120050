//! # agentdocs Render
//!
//! Renders agent definitions through the fixed Markdown page template,
//! builds the catalog index, and reads rendered pages back.

pub mod index;
pub mod markdown;
pub mod parse;
pub mod writer;

pub use index::{render_index, IndexPage, INDEX_FILE_NAME};
pub use markdown::{page_file_name, render_agent, AgentPage, Notice};
pub use parse::{import_page, parse_agent_page, PageError};
pub use writer::{
    check_pages, prune, render_catalog, write_page, write_pages, GeneratedPage, RenderSummary,
    StalePage, Staleness, WriteOutcome,
};
