//! # agentdocs CLI
//!
//! Command implementations for the `agentdocs` binary.

pub mod commands;
pub mod project;
