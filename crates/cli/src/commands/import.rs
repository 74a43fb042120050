//! agentdocs import command

use crate::project::{load_config, print_json, Context};
use anyhow::Context as _;
use clap::Args;
use console::style;
use render::import_page;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct ImportCommand {
    /// Rendered agent pages to convert back into YAML definitions
    #[arg(required = true)]
    pub pages: Vec<PathBuf>,

    /// Directory to write definitions to (defaults to agents_dir)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Overwrite existing definition files
    #[arg(long)]
    pub force: bool,
}

impl ImportCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<ExitCode> {
        let out_dir = match &self.out {
            Some(dir) => dir.clone(),
            None => load_config(ctx)?.agents_dir,
        };
        std::fs::create_dir_all(&out_dir)?;

        let mut imported = Vec::new();
        for page in &self.pages {
            imported.push(self.import_one(page, &out_dir)?);
        }

        if ctx.json {
            print_json(&import_report(&out_dir, &imported))?;
        } else {
            for (_, path) in &imported {
                println!("{} {}", style("✓").green(), path.display());
            }
            println!("Imported {} definitions into {}", imported.len(), out_dir.display());
        }
        Ok(ExitCode::SUCCESS)
    }

    fn import_one(&self, page: &Path, out_dir: &Path) -> anyhow::Result<(String, PathBuf)> {
        let agent = import_page(page)?;
        let target = out_dir.join(format!("{}.yaml", agent.name));
        if target.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                target.display()
            );
        }

        let yaml = serde_yaml::to_string(&agent)?;
        std::fs::write(&target, yaml)
            .with_context(|| format!("failed to write {}", target.display()))?;
        tracing::debug!(agent = %agent.name, target = %target.display(), "Imported page");
        Ok((agent.name, target))
    }
}

/// JSON form of an import run
fn import_report(out_dir: &Path, imported: &[(String, PathBuf)]) -> Value {
    json!({
        "outDir": out_dir,
        "imported": imported
            .iter()
            .map(|(name, path)| json!({ "name": name, "path": path }))
            .collect::<Vec<_>>(),
    })
}
