//! agentdocs check command

use crate::project::{print_json, Context, Project};
use catalog::Catalog;
use clap::{Args, Subcommand};
use console::style;
use rbac::{can_delegate, Resolver};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(subcommand)]
    pub command: CheckSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum CheckSubcommand {
    /// Check if an agent's scope declares read access to a path
    Access {
        /// Agent name
        name: String,
        /// Path to check
        path: String,
    },
    /// Check if an agent's scope declares write access to a path
    Modify {
        /// Agent name
        name: String,
        /// Path to check
        path: String,
    },
    /// Check if an agent declares delegation to another agent
    Delegate {
        /// Delegating agent
        from: String,
        /// Target agent
        to: String,
    },
}

/// Outcome of a single declaration check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub allowed: bool,
    pub reason: String,
}

impl CheckSubcommand {
    /// Evaluate the check against a catalog
    pub fn evaluate(&self, catalog: &Catalog) -> anyhow::Result<CheckResult> {
        let resolver = Resolver::new(catalog);
        let result = match self {
            CheckSubcommand::Access { name, path } => {
                let rules = resolver.resolve(name)?.rules();
                match (rules.access_entry_for(path), rules.modify_entry_for(path)) {
                    (Some(entry), _) => allowed(format!("granted by can_access '{}'", entry.raw())),
                    (None, Some(entry)) => allowed(format!("granted by can_modify '{}'", entry.raw())),
                    (None, None) => denied(format!("no scope entry of '{}' covers '{}'", name, path)),
                }
            }
            CheckSubcommand::Modify { name, path } => {
                let rules = resolver.resolve(name)?.rules();
                match rules.modify_entry_for(path) {
                    Some(entry) => allowed(format!("granted by can_modify '{}'", entry.raw())),
                    None => denied(format!("no can_modify entry of '{}' covers '{}'", name, path)),
                }
            }
            CheckSubcommand::Delegate { from, to } => {
                if can_delegate(catalog, from, to)? {
                    allowed(format!("'{}' lists '{}' as an allowed subagent", from, to))
                } else {
                    denied(format!("'{}' does not declare delegation to '{}'", from, to))
                }
            }
        };
        Ok(result)
    }
}

fn allowed(reason: String) -> CheckResult {
    CheckResult { allowed: true, reason }
}

fn denied(reason: String) -> CheckResult {
    CheckResult { allowed: false, reason }
}

impl CheckCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<ExitCode> {
        let project = Project::load(ctx)?;
        let result = self.command.evaluate(&project.catalog)?;

        if ctx.json {
            print_json(&result)?;
        } else if result.allowed {
            println!("{} {}", style("allowed").green().bold(), result.reason);
        } else {
            println!("{} {}", style("denied").red().bold(), result.reason);
        }

        Ok(if result.allowed {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AgentDefinition, TemplateDefinition};

    fn catalog() -> Catalog {
        Catalog::from_definitions(
            vec![AgentDefinition::new("editor", "Editor")
                .inherits_from("base_content")
                .with_modify(vec!["content/drafts/".to_string()])
                .with_delegation(vec!["proofreader".to_string()])],
            vec![TemplateDefinition::new("base_content").with_access(vec!["content/".to_string()])],
        )
        .unwrap()
    }

    fn access(name: &str, path: &str) -> CheckSubcommand {
        CheckSubcommand::Access {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn test_access_through_template() {
        let result = access("editor", "content/published/a.md").evaluate(&catalog()).unwrap();
        assert!(result.allowed);
        assert!(result.reason.contains("can_access 'content/'"));

        assert!(!access("editor", "finance/q1.csv").evaluate(&catalog()).unwrap().allowed);
    }

    #[test]
    fn test_modify() {
        let check = CheckSubcommand::Modify {
            name: "editor".to_string(),
            path: "content/published/a.md".to_string(),
        };
        assert!(!check.evaluate(&catalog()).unwrap().allowed);

        let check = CheckSubcommand::Modify {
            name: "editor".to_string(),
            path: "content/drafts/a.md".to_string(),
        };
        assert!(check.evaluate(&catalog()).unwrap().allowed);
    }

    #[test]
    fn test_delegate() {
        let check = CheckSubcommand::Delegate {
            from: "editor".to_string(),
            to: "proofreader".to_string(),
        };
        assert!(check.evaluate(&catalog()).unwrap().allowed);
    }

    #[test]
    fn test_unknown_agent_is_error() {
        let err = access("ghost", "content/").evaluate(&catalog()).unwrap_err();
        assert!(err.to_string().contains("Available agents: editor"));
    }
}
