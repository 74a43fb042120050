//! agentdocs show command

use crate::project::{print_json, Context, Project};
use clap::Args;
use console::style;
use rbac::{DelegationGraph, EffectiveEntry, ResolvedAgent, Resolver};
use std::path::Path;
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Agent name
    pub name: String,
}

impl ShowCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<ExitCode> {
        let project = Project::load(ctx)?;
        let resolved = Resolver::new(&project.catalog).resolve(&self.name)?;
        let graph = DelegationGraph::from_catalog(&project.catalog);
        let delegated_by = graph.delegators_of(&self.name);
        let reachable = graph.reachable_from(&self.name);
        let source = project.catalog.agent_source(&self.name);

        if ctx.json {
            print_json(&serde_json::json!({
                "agent": resolved,
                "source": source,
                "delegatedBy": delegated_by,
                "reachableSubagents": reachable,
            }))?;
            return Ok(ExitCode::SUCCESS);
        }

        print_resolved(&resolved, source);
        println!();
        println!("{}", style("Delegation").bold());
        let declared = resolved.definition.allowed_subagents();
        if declared.is_empty() {
            println!("  declares no subagents");
        } else {
            println!("  declares: {}", declared.join(", "));
            println!("  reaches:  {}", reachable.join(", "));
        }
        if !delegated_by.is_empty() {
            println!("  delegated by: {}", delegated_by.join(", "));
        }
        Ok(ExitCode::SUCCESS)
    }
}

fn print_resolved(resolved: &ResolvedAgent, source: Option<&Path>) {
    let agent = &resolved.definition;
    println!(
        "{} ({}, {}, v{})",
        style(&agent.name).bold(),
        agent.agent_type,
        agent.status,
        agent.version
    );
    println!("  {}", agent.role);
    if let Some(source) = source {
        println!("  {}", style(format!("defined in {}", source.display())).dim());
    }
    println!();
    println!("{}", style("Inheritance").bold());
    println!("  {}", resolved.chain.join(" -> "));
    if let Some(missing) = &resolved.unresolved_parent {
        println!("  {} unresolved template '{}'", style("!").yellow(), missing);
    }
    println!();
    print_entries("Can Access", &resolved.can_access, &agent.name);
    print_entries("Can Modify", &resolved.can_modify, &agent.name);
}

fn print_entries(title: &str, entries: &[EffectiveEntry], own: &str) {
    println!("{}", style(title).bold());
    if entries.is_empty() {
        println!("  (none)");
    }
    for entry in entries {
        if entry.origin == own {
            println!("  {}", entry.path);
        } else {
            println!("  {}  {}", entry.path, style(format!("(from {})", entry.origin)).dim());
        }
    }
}
