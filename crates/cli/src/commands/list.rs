//! agentdocs list command

use crate::project::{print_json, Context, Project};
use clap::Args;
use console::style;
use shared::{AgentStatus, AgentSummary, AgentType};
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only agents with this status (active, beta, experimental, deprecated)
    #[arg(long)]
    pub status: Option<AgentStatus>,

    /// Only agents of this type (main, subagent)
    #[arg(long = "type")]
    pub agent_type: Option<AgentType>,
}

impl ListCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<ExitCode> {
        let project = Project::load(ctx)?;
        let agents: Vec<AgentSummary> = project
            .catalog
            .filter(self.status, self.agent_type)
            .into_iter()
            .map(|a| a.summary())
            .collect();

        if ctx.json {
            print_json(&agents)?;
            return Ok(ExitCode::SUCCESS);
        }

        if agents.is_empty() {
            println!("No agents found.");
            return Ok(ExitCode::SUCCESS);
        }

        let width = agents.iter().map(|a| a.name.len()).max().unwrap_or(0);
        for agent in &agents {
            println!(
                "{}  {:<10}  {:<12}  {}",
                style(format!("{:width$}", agent.name, width = width)).bold(),
                agent.agent_type.label(),
                agent.status.as_str(),
                agent.role
            );
        }
        println!("{} agents", agents.len());
        Ok(ExitCode::SUCCESS)
    }
}
