//! agentdocs render command

use crate::project::{print_json, Context, Project};
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use render::{check_pages, prune, render_catalog, write_pages, Notice, StalePage};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Output directory (overrides output_dir in the config)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Do not write; fail if generated pages are missing or stale
    #[arg(long)]
    pub check: bool,

    /// Delete generated pages whose definition no longer exists
    #[arg(long)]
    pub prune: bool,

    /// Skip the README.md index
    #[arg(long)]
    pub no_index: bool,
}

impl RenderCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<ExitCode> {
        let project = Project::load(ctx)?;
        let out_dir = self
            .out
            .clone()
            .unwrap_or_else(|| project.config.output_dir.clone());
        let notice = Notice::from_config(&project.config);
        let pages = render_catalog(&project.catalog, &notice, project.config.index && !self.no_index);

        if self.check {
            let stale = check_pages(&out_dir, &pages, &notice);
            if ctx.json {
                print_json(&check_report(pages.len(), &stale))?;
            } else if stale.is_empty() {
                println!("{} {} pages up to date", style("✓").green(), pages.len());
            } else {
                for page in &stale {
                    println!(
                        "{} {} ({})",
                        style("✗").red(),
                        page.path.display(),
                        page.reason.as_str()
                    );
                }
                println!("Run `agentdocs render` to regenerate.");
            }
            return Ok(if stale.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }

        let progress = if ctx.json {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(pages.len() as u64)
        };
        progress.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")?.progress_chars("=> "),
        );

        let mut summary = write_pages(&out_dir, &pages, |page, _| {
            progress.set_message(page.file_name.clone());
            progress.inc(1);
        })?;
        progress.finish_and_clear();

        if self.prune {
            summary.pruned = prune(&out_dir, &pages, &notice)?;
        }

        if ctx.json {
            print_json(&json!({
                "outDir": out_dir,
                "written": summary.written,
                "unchanged": summary.unchanged,
                "pruned": summary.pruned,
            }))?;
        } else {
            println!(
                "{} {} written, {} unchanged, {} pruned -> {}",
                style("✓").green(),
                summary.written,
                summary.unchanged,
                summary.pruned.len(),
                out_dir.display()
            );
        }
        Ok(ExitCode::SUCCESS)
    }
}

/// JSON form of a `--check` run
fn check_report(total: usize, stale: &[StalePage]) -> Value {
    json!({
        "upToDate": stale.is_empty(),
        "pages": total,
        "stale": stale
            .iter()
            .map(|page| json!({ "path": page.path, "reason": page.reason.as_str() }))
            .collect::<Vec<_>>(),
    })
}
