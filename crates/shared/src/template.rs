//! Base template types

use crate::agent::Scope;
use serde::{Deserialize, Serialize};

/// Named base an agent inherits scope from. Templates are never rendered
/// as agent pages; they may themselves inherit from another template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Parent template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits_from: Option<String>,

    #[serde(default)]
    pub scope: Scope,
}

impl TemplateDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            inherits_from: None,
            scope: Scope::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_access(mut self, paths: Vec<String>) -> Self {
        self.scope.can_access = paths;
        self
    }

    pub fn with_modify(mut self, paths: Vec<String>) -> Self {
        self.scope.can_modify = paths;
        self
    }

    pub fn inherits_from(mut self, parent: impl Into<String>) -> Self {
        self.inherits_from = Some(parent.into());
        self
    }
}
