//! Project loading shared by all commands

use anyhow::Context as _;
use catalog::{load_catalog, Catalog};
use shared::CatalogConfig;
use std::path::PathBuf;
use tracing::debug;

/// Global options passed to every command
#[derive(Debug, Clone)]
pub struct Context {
    /// Path to agentdocs.yaml
    pub config_path: PathBuf,
    /// Print machine-readable JSON instead of text
    pub json: bool,
}

/// Loaded config and catalog
#[derive(Debug)]
pub struct Project {
    pub config: CatalogConfig,
    pub catalog: Catalog,
}

impl Project {
    /// Load the config (defaults if absent) and every definition it points at
    pub fn load(ctx: &Context) -> anyhow::Result<Self> {
        let config = load_config(ctx)?;
        let catalog = load_catalog(&config.agents_dir, &config.templates_dir).with_context(|| {
            format!(
                "failed to load catalog from {}",
                config.agents_dir.display()
            )
        })?;

        debug!(
            agents = catalog.len(),
            templates = catalog.templates().count(),
            "Loaded catalog"
        );
        Ok(Self { config, catalog })
    }
}

pub fn load_config(ctx: &Context) -> anyhow::Result<CatalogConfig> {
    CatalogConfig::load_or_default(&ctx.config_path)
        .with_context(|| format!("failed to read {}", ctx.config_path.display()))
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
