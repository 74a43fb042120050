//! Catalog - Name-indexed agent definitions and templates

use shared::{
    AgentDefinition, AgentNotFoundError, AgentStatus, AgentSummary, AgentType, CatalogError,
    Result, TemplateDefinition, TemplateNotFoundError,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A record together with the file it was loaded from
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub definition: T,
    pub source: PathBuf,
}

impl<T> Sourced<T> {
    pub fn new(definition: T, source: PathBuf) -> Self {
        Self { definition, source }
    }
}

/// All agents and templates of a project, keyed by name.
///
/// Maps are ordered so listings and generated output are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    agents: BTreeMap<String, Sourced<AgentDefinition>>,
    templates: BTreeMap<String, Sourced<TemplateDefinition>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from in-memory records (source paths are synthetic)
    pub fn from_definitions(
        agents: impl IntoIterator<Item = AgentDefinition>,
        templates: impl IntoIterator<Item = TemplateDefinition>,
    ) -> Result<Self> {
        let mut catalog = Self::new();
        for template in templates {
            let source = PathBuf::from(format!("<memory>/{}", template.name));
            catalog.insert_template(Sourced::new(template, source))?;
        }
        for agent in agents {
            let source = PathBuf::from(format!("<memory>/{}", agent.name));
            catalog.insert_agent(Sourced::new(agent, source))?;
        }
        Ok(catalog)
    }

    /// Register an agent; names must be unique
    pub fn insert_agent(&mut self, agent: Sourced<AgentDefinition>) -> Result<()> {
        if let Some(existing) = self.agents.get(&agent.definition.name) {
            return Err(CatalogError::DuplicateName {
                kind: "agent",
                name: agent.definition.name.clone(),
                first: existing.source.clone(),
                second: agent.source,
            });
        }
        self.agents.insert(agent.definition.name.clone(), agent);
        Ok(())
    }

    /// Register a template; names must be unique
    pub fn insert_template(&mut self, template: Sourced<TemplateDefinition>) -> Result<()> {
        if let Some(existing) = self.templates.get(&template.definition.name) {
            return Err(CatalogError::DuplicateName {
                kind: "template",
                name: template.definition.name.clone(),
                first: existing.source.clone(),
                second: template.source,
            });
        }
        self.templates.insert(template.definition.name.clone(), template);
        Ok(())
    }

    /// Get an agent by name
    pub fn agent(&self, name: &str) -> Option<&AgentDefinition> {
        self.agents.get(name).map(|s| &s.definition)
    }

    /// Get the file an agent was loaded from
    pub fn agent_source(&self, name: &str) -> Option<&Path> {
        self.agents.get(name).map(|s| s.source.as_path())
    }

    /// Get a template by name
    pub fn template(&self, name: &str) -> Option<&TemplateDefinition> {
        self.templates.get(name).map(|s| &s.definition)
    }

    pub fn has_agent(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Get an agent or an error listing the available names
    pub fn require_agent(
        &self,
        name: &str,
    ) -> std::result::Result<&AgentDefinition, AgentNotFoundError> {
        self.agent(name).ok_or_else(|| AgentNotFoundError {
            name: name.to_string(),
            available_agents: self.agent_names().into_iter().map(String::from).collect(),
        })
    }

    /// Get a template or an error listing the available names
    pub fn require_template(
        &self,
        name: &str,
    ) -> std::result::Result<&TemplateDefinition, TemplateNotFoundError> {
        self.template(name).ok_or_else(|| TemplateNotFoundError {
            name: name.to_string(),
            available_templates: self.template_names().into_iter().map(String::from).collect(),
        })
    }

    /// All agents in name order
    pub fn agents(&self) -> impl Iterator<Item = &AgentDefinition> {
        self.agents.values().map(|s| &s.definition)
    }

    /// All templates in name order
    pub fn templates(&self) -> impl Iterator<Item = &TemplateDefinition> {
        self.templates.values().map(|s| &s.definition)
    }

    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.keys().map(|s| s.as_str()).collect()
    }

    pub fn template_names(&self) -> Vec<&str> {
        self.templates.keys().map(|s| s.as_str()).collect()
    }

    pub fn summaries(&self) -> Vec<AgentSummary> {
        self.agents().map(AgentDefinition::summary).collect()
    }

    /// Agents matching the optional status and type filters
    pub fn filter(
        &self,
        status: Option<AgentStatus>,
        agent_type: Option<AgentType>,
    ) -> Vec<&AgentDefinition> {
        self.agents()
            .filter(|a| status.map_or(true, |s| a.status == s))
            .filter(|a| agent_type.map_or(true, |t| a.agent_type == t))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
