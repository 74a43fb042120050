//! Reading rendered agent pages back into definitions

use shared::{AgentDefinition, CatalogError, Delegation};
use std::path::Path;
use thiserror::Error;

/// Error parsing a rendered page
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("missing '## {0}' section")]
    MissingSection(&'static str),

    #[error("missing metadata field '{0}'")]
    MissingField(&'static str),

    #[error("invalid {field} '{value}': {reason}")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Metadata,
    Description,
    Directive,
    CanAccess,
    CanModify,
    Delegation,
    Other,
    Footer,
}

/// Parse a page produced by the agent page template
pub fn parse_agent_page(markdown: &str) -> Result<AgentDefinition, PageError> {
    let mut section = Section::Preamble;
    let mut seen_metadata = false;

    let mut name = None;
    let mut role = None;
    let mut version = None;
    let mut status = None;
    let mut agent_type = None;
    let mut inherits_from = None;
    let mut description: Vec<&str> = Vec::new();
    let mut directive: Vec<&str> = Vec::new();
    let mut can_access = Vec::new();
    let mut can_modify = Vec::new();
    let mut delegation: Option<Delegation> = None;

    // Only the last rule opens the footer; earlier ones belong to free text.
    let footer_rule = markdown
        .lines()
        .enumerate()
        .filter(|(_, line)| line.trim() == "---")
        .map(|(i, _)| i)
        .last();

    for (index, line) in markdown.lines().enumerate() {
        let in_text = matches!(section, Section::Description | Section::Directive);
        if let Some(heading) = line.strip_prefix("## ") {
            if in_text && !is_page_section(heading.trim()) {
                push_text(section, line, &mut description, &mut directive);
                continue;
            }
            section = match heading.trim() {
                "Metadata" => {
                    seen_metadata = true;
                    Section::Metadata
                }
                "Description" => Section::Description,
                "Directive" => Section::Directive,
                "Scope" => Section::Other,
                "Delegation" => {
                    delegation.get_or_insert_with(Delegation::default);
                    Section::Delegation
                }
                _ => Section::Other,
            };
            continue;
        }
        if let Some(heading) = line.strip_prefix("### ").filter(|_| !in_text) {
            section = match heading.trim() {
                "Can Access" => Section::CanAccess,
                "Can Modify" => Section::CanModify,
                _ => Section::Other,
            };
            continue;
        }
        if Some(index) == footer_rule && section != Section::Preamble {
            section = Section::Footer;
            continue;
        }

        match section {
            Section::Metadata => {
                let Some((key, value)) = metadata_pair(line) else {
                    continue;
                };
                let value = value.to_string();
                match key {
                    "Name" => name = Some(value),
                    "Role" => role = Some(value),
                    "Version" => version = Some(value),
                    "Status" => status = Some(value),
                    "Type" => agent_type = Some(value),
                    "Inherits From" => inherits_from = Some(value),
                    _ => {}
                }
            }
            Section::Description | Section::Directive => {
                push_text(section, line, &mut description, &mut directive)
            }
            Section::CanAccess => can_access.extend(scope_item(line)),
            Section::CanModify => can_modify.extend(scope_item(line)),
            Section::Delegation => {
                let delegation = delegation.get_or_insert_with(Delegation::default);
                if let Some((key, value)) = metadata_pair(line) {
                    if key == "Enabled" {
                        delegation.enabled = value.eq_ignore_ascii_case("true");
                    }
                } else if let Some(item) = line.trim_start().strip_prefix("- ") {
                    if line.starts_with(char::is_whitespace) {
                        delegation.allowed_subagents.push(item.trim().to_string());
                    }
                }
            }
            Section::Preamble | Section::Other | Section::Footer => {}
        }
    }

    if !seen_metadata {
        return Err(PageError::MissingSection("Metadata"));
    }
    let name = name
        .filter(|n| !n.is_empty())
        .ok_or(PageError::MissingField("Name"))?;

    let mut agent = AgentDefinition::new(name, role.unwrap_or_default());
    if let Some(version) = version {
        agent.version = version;
    }
    if let Some(status) = status {
        agent.status = status.parse().map_err(|reason| PageError::InvalidValue {
            field: "status",
            value: status.clone(),
            reason,
        })?;
    }
    if let Some(agent_type) = agent_type {
        agent.agent_type = agent_type.parse().map_err(|reason| PageError::InvalidValue {
            field: "type",
            value: agent_type.clone(),
            reason,
        })?;
    }
    agent.inherits_from = inherits_from.filter(|p| !p.is_empty());
    agent.description = join_block(&description);
    agent.directive = join_block(&directive);
    agent.scope.can_access = can_access;
    agent.scope.can_modify = can_modify;
    agent.delegation = delegation;

    Ok(agent)
}

/// Read a rendered page from disk
pub fn import_page(path: &Path) -> shared::Result<AgentDefinition> {
    let content = std::fs::read_to_string(path)?;
    parse_agent_page(&content).map_err(|e| CatalogError::parse(path, e))
}

/// Headings the page template emits at `##` level
fn is_page_section(heading: &str) -> bool {
    matches!(
        heading,
        "Metadata" | "Description" | "Directive" | "Scope" | "Delegation"
    )
}

fn push_text<'a>(
    section: Section,
    line: &'a str,
    description: &mut Vec<&'a str>,
    directive: &mut Vec<&'a str>,
) {
    match section {
        Section::Description => description.push(line),
        Section::Directive => {
            let first = directive.iter().all(|l| l.trim().is_empty());
            let line = match line.strip_prefix("**Primary Goal**:") {
                Some(rest) if first => rest,
                _ => line,
            };
            directive.push(line);
        }
        _ => {}
    }
}

/// `- **Key**: value` -> (Key, value)
fn metadata_pair(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix("- **")?;
    let (key, value) = rest.split_once("**:")?;
    Some((key.trim(), value.trim()))
}

/// `- `path`` -> path; `_None_` and blank lines yield nothing
fn scope_item(line: &str) -> Option<String> {
    let item = line.trim().strip_prefix("- ")?.trim();
    let item = item
        .strip_prefix('`')
        .and_then(|i| i.strip_suffix('`'))
        .unwrap_or(item);
    (!item.is_empty()).then(|| item.to_string())
}

/// Join block lines, trimming blank lines at both ends
fn join_block(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}
