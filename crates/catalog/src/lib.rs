//! # agentdocs Catalog
//!
//! Loads agent definitions and base templates from YAML (or Markdown with
//! YAML frontmatter) and indexes them by name.

pub mod catalog;
pub mod loader;

pub use catalog::{Catalog, Sourced};
pub use loader::{load_catalog, CatalogLoader};
