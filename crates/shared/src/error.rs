//! Error types for agentdocs

use std::path::PathBuf;
use thiserror::Error;

/// Error thrown when an agent is not found in the catalog
#[derive(Debug, Error)]
#[error("Agent '{name}' not found. Available agents: {}", available_agents.join(", "))]
pub struct AgentNotFoundError {
    pub name: String,
    pub available_agents: Vec<String>,
}

/// Error thrown when a base template is not found in the catalog
#[derive(Debug, Error)]
#[error("Template '{name}' not found. Available templates: {}", available_templates.join(", "))]
pub struct TemplateNotFoundError {
    pub name: String,
    pub available_templates: Vec<String>,
}

/// General agentdocs error type
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    AgentNotFound(#[from] AgentNotFoundError),

    #[error(transparent)]
    TemplateNotFound(#[from] TemplateNotFoundError),

    #[error("Duplicate {kind} name '{name}' in {} and {}", first.display(), second.display())]
    DuplicateName {
        kind: &'static str,
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CatalogError {
    /// Wrap a parse failure with the offending file path
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
