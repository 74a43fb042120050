//! # agentdocs Shared
//!
//! Common types used across all agentdocs crates.

pub mod agent;
pub mod config;
pub mod error;
pub mod template;

// Re-exports
pub use agent::*;
pub use config::*;
pub use error::*;
pub use template::*;
