//! Catalog index page (README.md)

use crate::markdown::{page_file_name, Notice};
use catalog::Catalog;
use shared::{AgentDefinition, AgentType};
use std::fmt;

pub const INDEX_FILE_NAME: &str = "README.md";

/// Index of every agent and template in a catalog
pub struct IndexPage<'a> {
    pub catalog: &'a Catalog,
    pub notice: &'a Notice,
}

impl<'a> IndexPage<'a> {
    pub fn new(catalog: &'a Catalog, notice: &'a Notice) -> Self {
        Self { catalog, notice }
    }
}

impl fmt::Display for IndexPage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main_agents = self.catalog.filter(None, Some(AgentType::MainAgent));
        let subagents = self.catalog.filter(None, Some(AgentType::Subagent));
        let template_count = self.catalog.templates().count();

        writeln!(f, "# Agent Catalog")?;
        writeln!(f)?;
        writeln!(
            f,
            "{} agents ({} main agents, {} subagents), {} templates.",
            self.catalog.len(),
            main_agents.len(),
            subagents.len(),
            template_count
        )?;
        writeln!(f)?;

        writeln!(f, "## Main Agents")?;
        writeln!(f)?;
        write_table(f, &main_agents)?;
        writeln!(f)?;

        writeln!(f, "## Subagents")?;
        writeln!(f)?;
        write_table(f, &subagents)?;
        writeln!(f)?;

        writeln!(f, "## Templates")?;
        writeln!(f)?;
        if template_count == 0 {
            writeln!(f, "_None_")?;
        }
        for template in self.catalog.templates() {
            if template.description.trim().is_empty() {
                writeln!(f, "- `{}`", template.name)?;
            } else {
                writeln!(f, "- `{}`: {}", template.name, template.description.trim())?;
            }
        }
        writeln!(f)?;

        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "{}", self.notice)
    }
}

fn write_table(f: &mut fmt::Formatter<'_>, agents: &[&AgentDefinition]) -> fmt::Result {
    if agents.is_empty() {
        return writeln!(f, "_None_");
    }

    writeln!(f, "| Name | Role | Status | Version |")?;
    writeln!(f, "| --- | --- | --- | --- |")?;
    for agent in agents {
        writeln!(
            f,
            "| [{}]({}) | {} | {} | {} |",
            agent.name,
            page_file_name(&agent.name),
            escape_cell(&agent.role),
            agent.status,
            escape_cell(&agent.version)
        )?;
    }
    Ok(())
}

fn escape_cell(text: &str) -> String {
    text.trim().replace('|', "\\|")
}

/// Render the catalog index
pub fn render_index(catalog: &Catalog, notice: &Notice) -> String {
    IndexPage::new(catalog, notice).to_string()
}
