//! agentdocs init command

use clap::Args;
use console::style;
use shared::{CatalogConfig, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Create minimal project without example definitions
    #[arg(long)]
    pub minimal: bool,

    /// Overwrite an existing agentdocs.yaml
    #[arg(long)]
    pub force: bool,
}

const BASE_TEMPLATE: &str = r#"name: base_analyst
description: Shared read access for analysis roles
scope:
  can_access:
    - data/
    - reports/
"#;

const LEAD_AGENT: &str = r#"name: financial_analyst
role: Financial Analyst
version: 1.0.0
status: active
type: main_agent
inherits_from: base_analyst
description: Analyzes financial statements and prepares quarterly summaries.
directive: Deliver accurate, well-sourced financial analysis.
scope:
  can_access:
    - data/finance/
  can_modify:
    - reports/finance/
delegation:
  enabled: true
  allowed_subagents:
    - data_collector
"#;

const SUBAGENT: &str = r#"name: data_collector
role: Data Collector
version: 1.0.0
status: beta
type: subagent
inherits_from: base_analyst
description: Gathers raw figures for the financial analyst.
directive: Collect complete and current source data.
scope:
  can_access:
    - data/raw/
"#;

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<ExitCode> {
        println!("Initializing agentdocs project in {:?}", self.directory);

        let config_path = self.directory.join(CONFIG_FILE_NAME);
        if config_path.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }

        // Create directory structure
        let config = CatalogConfig::default();
        let agents_dir = self.directory.join(&config.agents_dir);
        let templates_dir = self.directory.join(&config.templates_dir);
        std::fs::create_dir_all(&agents_dir)?;
        std::fs::create_dir_all(&templates_dir)?;
        std::fs::write(&config_path, config.to_yaml()?)?;

        if !self.minimal {
            self.create_examples(&agents_dir, &templates_dir)?;
        }

        println!("{} agentdocs project initialized", style("✓").green());
        println!(
            "  Next: add definitions under {} and run {}",
            style(agents_dir.display()).cyan(),
            style("agentdocs render").bold()
        );
        Ok(ExitCode::SUCCESS)
    }

    fn create_examples(&self, agents_dir: &Path, templates_dir: &Path) -> anyhow::Result<()> {
        std::fs::write(templates_dir.join("base_analyst.yaml"), BASE_TEMPLATE)?;
        std::fs::write(agents_dir.join("financial_analyst.yaml"), LEAD_AGENT)?;
        std::fs::write(agents_dir.join("data_collector.yaml"), SUBAGENT)?;
        Ok(())
    }
}
