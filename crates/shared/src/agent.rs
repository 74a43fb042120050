//! Agent definition types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an agent definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Active,
    Beta,
    Experimental,
    Deprecated,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => "active",
            AgentStatus::Beta => "beta",
            AgentStatus::Experimental => "experimental",
            AgentStatus::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(AgentStatus::Active),
            "beta" => Ok(AgentStatus::Beta),
            "experimental" => Ok(AgentStatus::Experimental),
            "deprecated" => Ok(AgentStatus::Deprecated),
            other => Err(format!("unknown agent status '{}'", other)),
        }
    }
}

/// Whether an agent is a top-level agent or a delegated subagent.
///
/// Accepts `main_agent`, `main`, `Main Agent`, `subagent` and `Subagent`
/// when parsed; always renders as `Main Agent` / `Subagent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgentType {
    #[default]
    MainAgent,
    Subagent,
}

impl AgentType {
    /// Label used in rendered pages
    pub fn label(&self) -> &'static str {
        match self {
            AgentType::MainAgent => "Main Agent",
            AgentType::Subagent => "Subagent",
        }
    }

    /// Key used in YAML definitions
    pub fn key(&self) -> &'static str {
        match self {
            AgentType::MainAgent => "main_agent",
            AgentType::Subagent => "subagent",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "main" | "mainagent" => Ok(AgentType::MainAgent),
            "sub" | "subagent" => Ok(AgentType::Subagent),
            _ => Err(format!("unknown agent type '{}'", s.trim())),
        }
    }
}

impl TryFrom<String> for AgentType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgentType> for String {
    fn from(value: AgentType) -> Self {
        value.key().to_string()
    }
}

/// Paths an agent may read and write
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    /// Path-like entries the agent may read
    #[serde(default)]
    pub can_access: Vec<String>,

    /// Path-like entries the agent may write
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub can_modify: Vec<String>,
}

impl Scope {
    pub fn is_empty(&self) -> bool {
        self.can_access.is_empty() && self.can_modify.is_empty()
    }
}

/// Declared delegation to subordinate agents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_subagents: Vec<String>,
}

impl Delegation {
    /// Enabled delegation to the given subagents
    pub fn to(subagents: Vec<String>) -> Self {
        Self {
            enabled: true,
            allowed_subagents: subagents,
        }
    }
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Agent definition record, one per rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Unique lowercase-snake-case identifier (e.g., 'financial_analyst')
    pub name: String,

    /// Human-readable title
    pub role: String,

    /// Semantic version of the definition
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub status: AgentStatus,

    #[serde(rename = "type", default)]
    pub agent_type: AgentType,

    /// Base template this agent inherits scope from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inherits_from: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Primary goal sentence
    #[serde(default)]
    pub directive: String,

    #[serde(default)]
    pub scope: Scope,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegation: Option<Delegation>,
}

impl AgentDefinition {
    /// Create a new agent with minimal configuration
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            version: default_version(),
            status: AgentStatus::default(),
            agent_type: AgentType::default(),
            inherits_from: None,
            description: String::new(),
            directive: String::new(),
            scope: Scope::default(),
            delegation: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set directive
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = directive.into();
        self
    }

    /// Builder: set readable paths
    pub fn with_access(mut self, paths: Vec<String>) -> Self {
        self.scope.can_access = paths;
        self
    }

    /// Builder: set writable paths
    pub fn with_modify(mut self, paths: Vec<String>) -> Self {
        self.scope.can_modify = paths;
        self
    }

    /// Builder: set inheritance
    pub fn inherits_from(mut self, template: impl Into<String>) -> Self {
        self.inherits_from = Some(template.into());
        self
    }

    /// Builder: enable delegation to the given subagents
    pub fn with_delegation(mut self, subagents: Vec<String>) -> Self {
        self.delegation = Some(Delegation::to(subagents));
        self
    }

    pub fn with_type(mut self, agent_type: AgentType) -> Self {
        self.agent_type = agent_type;
        self
    }

    pub fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn is_main_agent(&self) -> bool {
        self.agent_type == AgentType::MainAgent
    }

    /// Check if delegation is declared and enabled
    pub fn delegates(&self) -> bool {
        self.delegation.as_ref().is_some_and(|d| d.enabled)
    }

    /// Subagents this agent declares, empty unless delegation is enabled
    pub fn allowed_subagents(&self) -> &[String] {
        match &self.delegation {
            Some(d) if d.enabled => &d.allowed_subagents[..],
            _ => &[],
        }
    }

    /// Check if this agent declares delegation to a specific subagent
    pub fn may_delegate_to(&self, subagent: &str) -> bool {
        self.allowed_subagents().iter().any(|s| s == subagent)
    }

    pub fn summary(&self) -> AgentSummary {
        AgentSummary {
            name: self.name.clone(),
            role: self.role.clone(),
            version: self.version.clone(),
            status: self.status,
            agent_type: self.agent_type,
            inherits_from: self.inherits_from.clone(),
            subagent_count: self.allowed_subagents().len(),
        }
    }
}

/// Summary info for an agent in listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub name: String,
    pub role: String,
    pub version: String,
    pub status: AgentStatus,
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    pub inherits_from: Option<String>,
    pub subagent_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_creation() {
        let agent = AgentDefinition::new("financial_analyst", "Financial Analyst")
            .with_description("Analyzes quarterly numbers")
            .with_access(vec!["data/finance/".to_string()])
            .inherits_from("base_analyst");

        assert_eq!(agent.name, "financial_analyst");
        assert_eq!(agent.version, "1.0.0");
        assert_eq!(agent.status, AgentStatus::Active);
        assert!(agent.is_main_agent());
        assert_eq!(agent.inherits_from.as_deref(), Some("base_analyst"));
        assert!(agent.scope.can_modify.is_empty());
    }

    #[test]
    fn test_delegation_queries() {
        let agent = AgentDefinition::new("lead", "Lead")
            .with_delegation(vec!["researcher".to_string()]);

        assert!(agent.delegates());
        assert!(agent.may_delegate_to("researcher"));
        assert!(!agent.may_delegate_to("writer"));
    }

    #[test]
    fn test_disabled_delegation_declares_nothing() {
        let mut agent = AgentDefinition::new("lead", "Lead");
        agent.delegation = Some(Delegation {
            enabled: false,
            allowed_subagents: vec!["researcher".to_string()],
        });

        assert!(!agent.delegates());
        assert!(agent.allowed_subagents().is_empty());
        assert!(!agent.may_delegate_to("researcher"));
    }

    #[test]
    fn test_agent_type_aliases() {
        assert_eq!("Main Agent".parse::<AgentType>().unwrap(), AgentType::MainAgent);
        assert_eq!("main_agent".parse::<AgentType>().unwrap(), AgentType::MainAgent);
        assert_eq!("main".parse::<AgentType>().unwrap(), AgentType::MainAgent);
        assert_eq!("Subagent".parse::<AgentType>().unwrap(), AgentType::Subagent);
        assert_eq!("sub-agent".parse::<AgentType>().unwrap(), AgentType::Subagent);
        assert!("supervisor".parse::<AgentType>().is_err());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Beta".parse::<AgentStatus>().unwrap(), AgentStatus::Beta);
        assert!("retired".parse::<AgentStatus>().is_err());
        assert_eq!(AgentStatus::Deprecated.to_string(), "deprecated");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
name: content_strategist
role: Content Strategist
version: 2.1.0
status: beta
type: Main Agent
inherits_from: base_content
description: Plans the editorial calendar.
directive: Keep the publishing pipeline full.
scope:
  can_access:
    - content/
    - analytics/reports/
  can_modify:
    - content/drafts/
delegation:
  enabled: true
  allowed_subagents:
    - copywriter
    - seo_reviewer
"#;

        let agent: AgentDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(agent.name, "content_strategist");
        assert_eq!(agent.status, AgentStatus::Beta);
        assert_eq!(agent.agent_type, AgentType::MainAgent);
        assert_eq!(agent.scope.can_access.len(), 2);
        assert_eq!(agent.scope.can_modify, vec!["content/drafts/"]);
        assert_eq!(agent.allowed_subagents().to_vec(), vec!["copywriter", "seo_reviewer"]);
    }

    #[test]
    fn test_yaml_defaults() {
        let yaml = "name: helper\nrole: Helper\ntype: subagent\n";
        let agent: AgentDefinition = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(agent.version, "1.0.0");
        assert_eq!(agent.status, AgentStatus::Active);
        assert_eq!(agent.agent_type, AgentType::Subagent);
        assert!(agent.scope.is_empty());
        assert!(agent.delegation.is_none());
    }

    #[test]
    fn test_yaml_rejects_unknown_type() {
        let yaml = "name: helper\nrole: Helper\ntype: overlord\n";
        assert!(serde_yaml::from_str::<AgentDefinition>(yaml).is_err());
    }

    #[test]
    fn test_type_serializes_as_key() {
        let agent = AgentDefinition::new("helper", "Helper").with_type(AgentType::Subagent);
        let yaml = serde_yaml::to_string(&agent).unwrap();

        assert!(yaml.contains("type: subagent"));
        assert!(!yaml.contains("delegation"));
        assert!(!yaml.contains("inherits_from"));
    }

    #[test]
    fn test_summary() {
        let agent = AgentDefinition::new("lead", "Lead")
            .with_delegation(vec!["a".to_string(), "b".to_string()]);
        let summary = agent.summary();

        assert_eq!(summary.name, "lead");
        assert_eq!(summary.subagent_count, 2);
    }
}
