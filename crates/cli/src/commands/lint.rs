//! agentdocs lint command

use crate::project::{print_json, Context, Project};
use clap::Args;
use console::style;
use lint::{LintReport, Linter, Severity};
use std::process::ExitCode;

#[derive(Debug, Args)]
pub struct LintCommand {
    /// Treat warnings as failures
    #[arg(long)]
    pub deny_warnings: bool,
}

impl LintCommand {
    pub fn run(&self, ctx: &Context) -> anyhow::Result<ExitCode> {
        let project = Project::load(ctx)?;
        let deny_warnings = self.deny_warnings || project.config.lint.deny_warnings;

        let report = Linter::new(&project.catalog, project.config.lint.clone()).run();

        if ctx.json {
            print_json(&report)?;
        } else {
            print_report(&report);
        }

        if report.is_clean(deny_warnings) {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_report(report: &LintReport) {
    for issue in &report.issues {
        let label = match issue.severity {
            Severity::Error => style(format!("error[{}]", issue.code)).red().bold(),
            Severity::Warning => style(format!("warning[{}]", issue.code)).yellow(),
        };
        println!("{} {}: {}", label, style(&issue.subject).bold(), issue.message);
    }

    println!(
        "Checked {} agents and {} templates: {} errors, {} warnings",
        report.agents_checked,
        report.templates_checked,
        report.error_count(),
        report.warning_count()
    );
}
