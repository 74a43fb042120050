//! Agent page rendering

use shared::{AgentDefinition, CatalogConfig};
use std::fmt;

/// Trailing generation notice shared by every generated page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    /// Generation date appended to the text, if enabled
    pub generated_on: Option<String>,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generated_on: None,
        }
    }

    /// Notice from config; stamps today's UTC date when `timestamp` is set
    pub fn from_config(config: &CatalogConfig) -> Self {
        Self {
            text: config.notice.clone(),
            generated_on: config
                .timestamp
                .then(|| chrono::Utc::now().format("%Y-%m-%d").to_string()),
        }
    }

    /// Check if a rendered line is this notice (any date)
    pub fn is_notice_line(&self, line: &str) -> bool {
        line.trim()
            .strip_prefix('*')
            .is_some_and(|rest| rest.starts_with(self.text.trim()))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.generated_on {
            Some(date) => write!(f, "*{} Generated on {}.*", self.text.trim(), date),
            None => write!(f, "*{}*", self.text.trim()),
        }
    }
}

/// One agent rendered through the fixed page template
pub struct AgentPage<'a> {
    pub agent: &'a AgentDefinition,
    pub notice: &'a Notice,
}

impl<'a> AgentPage<'a> {
    pub fn new(agent: &'a AgentDefinition, notice: &'a Notice) -> Self {
        Self { agent, notice }
    }

    /// Output file name, `<name>.md`
    pub fn file_name(&self) -> String {
        page_file_name(&self.agent.name)
    }
}

pub fn page_file_name(agent_name: &str) -> String {
    format!("{}.md", agent_name)
}

impl fmt::Display for AgentPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let agent = self.agent;

        writeln!(f, "# {}", heading_text(agent))?;
        writeln!(f)?;

        writeln!(f, "## Metadata")?;
        writeln!(f)?;
        writeln!(f, "- **Name**: {}", agent.name)?;
        writeln!(f, "- **Role**: {}", agent.role)?;
        writeln!(f, "- **Version**: {}", agent.version)?;
        writeln!(f, "- **Status**: {}", agent.status)?;
        writeln!(f, "- **Type**: {}", agent.agent_type)?;
        if let Some(parent) = &agent.inherits_from {
            writeln!(f, "- **Inherits From**: {}", parent)?;
        }
        writeln!(f)?;

        writeln!(f, "## Description")?;
        writeln!(f)?;
        writeln!(f, "{}", agent.description.trim())?;
        writeln!(f)?;

        writeln!(f, "## Directive")?;
        writeln!(f)?;
        writeln!(f, "**Primary Goal**: {}", agent.directive.trim())?;
        writeln!(f)?;

        writeln!(f, "## Scope")?;
        writeln!(f)?;
        writeln!(f, "### Can Access")?;
        writeln!(f)?;
        write_paths(f, &agent.scope.can_access)?;
        writeln!(f)?;
        writeln!(f, "### Can Modify")?;
        writeln!(f)?;
        write_paths(f, &agent.scope.can_modify)?;
        writeln!(f)?;

        if agent.delegates() {
            writeln!(f, "## Delegation")?;
            writeln!(f)?;
            writeln!(f, "- **Enabled**: true")?;
            writeln!(f, "- **Allowed Subagents**:")?;
            for subagent in agent.allowed_subagents() {
                writeln!(f, "  - {}", subagent)?;
            }
            writeln!(f)?;
        }

        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "{}", self.notice)
    }
}

/// Page title: the role, or the name when the role is blank
fn heading_text(agent: &AgentDefinition) -> &str {
    if agent.role.trim().is_empty() {
        agent.name.as_str()
    } else {
        agent.role.trim()
    }
}

fn write_paths(f: &mut fmt::Formatter<'_>, paths: &[String]) -> fmt::Result {
    if paths.is_empty() {
        return writeln!(f, "_None_");
    }
    for path in paths {
        writeln!(f, "- `{}`", path)?;
    }
    Ok(())
}

/// Render one agent page
pub fn render_agent(agent: &AgentDefinition, notice: &Notice) -> String {
    AgentPage::new(agent, notice).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AgentStatus, AgentType};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_full_page() {
        let agent = AgentDefinition::new("campaign_manager", "Campaign Manager")
            .with_version("1.2.0")
            .with_status(AgentStatus::Beta)
            .inherits_from("base_marketing")
            .with_description("Coordinates multi-channel campaigns.")
            .with_directive("Ship campaigns on schedule.")
            .with_access(strings(&["marketing/", "analytics/campaigns/"]))
            .with_modify(strings(&["marketing/campaigns/"]))
            .with_delegation(strings(&["copywriter", "ad_buyer"]));

        let page = render_agent(&agent, &Notice::new("Generated. Do not edit."));

        let expected = "\
# Campaign Manager

## Metadata

- **Name**: campaign_manager
- **Role**: Campaign Manager
- **Version**: 1.2.0
- **Status**: beta
- **Type**: Main Agent
- **Inherits From**: base_marketing

## Description

Coordinates multi-channel campaigns.

## Directive

**Primary Goal**: Ship campaigns on schedule.

## Scope

### Can Access

- `marketing/`
- `analytics/campaigns/`

### Can Modify

- `marketing/campaigns/`

## Delegation

- **Enabled**: true
- **Allowed Subagents**:
  - copywriter
  - ad_buyer

---

*Generated. Do not edit.*
";
        assert_eq!(page, expected);
    }

    #[test]
    fn test_minimal_page_omits_optional_parts() {
        let agent = AgentDefinition::new("copywriter", "Copywriter")
            .with_type(AgentType::Subagent)
            .with_access(strings(&["marketing/copy/"]));

        let page = render_agent(&agent, &Notice::new("Auto-generated."));

        assert!(page.contains("- **Type**: Subagent\n"));
        assert!(!page.contains("Inherits From"));
        assert!(!page.contains("## Delegation"));
        assert!(page.contains("### Can Modify\n\n_None_\n"));
    }

    #[test]
    fn test_disabled_delegation_not_rendered() {
        let mut agent = AgentDefinition::new("lead", "Lead");
        agent.delegation = Some(shared::Delegation {
            enabled: false,
            allowed_subagents: strings(&["helper"]),
        });

        assert!(!render_agent(&agent, &Notice::new("n")).contains("## Delegation"));
    }

    #[test]
    fn test_blank_role_falls_back_to_name() {
        let agent = AgentDefinition::new("helper", " ");
        assert!(render_agent(&agent, &Notice::new("n")).starts_with("# helper\n"));
    }

    #[test]
    fn test_notice_with_date() {
        let notice = Notice {
            text: "Auto-generated.".to_string(),
            generated_on: Some("2026-01-31".to_string()),
        };

        assert_eq!(notice.to_string(), "*Auto-generated. Generated on 2026-01-31.*");
        assert!(notice.is_notice_line("*Auto-generated. Generated on 2025-12-01.*"));
        assert!(notice.is_notice_line("*Auto-generated.*"));
        assert!(!notice.is_notice_line("Auto-generated."));
    }

    #[test]
    fn test_notice_from_config() {
        let mut config = CatalogConfig::default();
        assert!(Notice::from_config(&config).generated_on.is_none());

        config.timestamp = true;
        let date = Notice::from_config(&config).generated_on.unwrap();
        assert_eq!(date.len(), 10);
    }

    #[test]
    fn test_file_name() {
        let agent = AgentDefinition::new("ux_researcher", "UX Researcher");
        let notice = Notice::new("n");
        assert_eq!(AgentPage::new(&agent, &notice).file_name(), "ux_researcher.md");
    }
}
