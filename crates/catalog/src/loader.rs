//! CatalogLoader - Load agent definitions and templates from YAML/MD files

use crate::catalog::{Catalog, Sourced};
use serde::de::DeserializeOwned;
use shared::{AgentDefinition, CatalogError, Result, TemplateDefinition};
use std::path::{Path, PathBuf};
use tracing::debug;

const EXTENSIONS: &[&str] = &["yaml", "yml", "md"];

/// Catalog loader
#[derive(Debug, Default)]
pub struct CatalogLoader {
    agents: Vec<Sourced<AgentDefinition>>,
    templates: Vec<Sourced<TemplateDefinition>>,
}

impl CatalogLoader {
    /// Create a new CatalogLoader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load agent definitions from a directory (recursively)
    pub fn load_agents_dir(&mut self, dir: &Path) -> Result<usize> {
        let files = definition_files(dir)?;
        let count = files.len();
        for path in files {
            let agent: AgentDefinition = load_file(&path)?;
            debug!(agent = %agent.name, path = %path.display(), "Loaded agent definition");
            self.agents.push(Sourced::new(agent, path));
        }
        Ok(count)
    }

    /// Load base templates from a directory (recursively)
    pub fn load_templates_dir(&mut self, dir: &Path) -> Result<usize> {
        let files = definition_files(dir)?;
        let count = files.len();
        for path in files {
            let template: TemplateDefinition = load_file(&path)?;
            debug!(template = %template.name, path = %path.display(), "Loaded template");
            self.templates.push(Sourced::new(template, path));
        }
        Ok(count)
    }

    /// Build the catalog, rejecting duplicate names
    pub fn into_catalog(self) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        for agent in self.agents {
            catalog.insert_agent(agent)?;
        }
        for template in self.templates {
            catalog.insert_template(template)?;
        }
        Ok(catalog)
    }
}

/// Load a catalog from the configured agent and template directories
pub fn load_catalog(agents_dir: &Path, templates_dir: &Path) -> Result<Catalog> {
    let mut loader = CatalogLoader::new();
    loader.load_templates_dir(templates_dir)?;
    loader.load_agents_dir(agents_dir)?;
    loader.into_catalog()
}

/// Load a single record from a YAML file or a Markdown file with YAML frontmatter
pub fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    let yaml = if has_extension(path, "md") {
        extract_frontmatter(&content).ok_or_else(|| {
            CatalogError::parse(path, "invalid Markdown definition: missing YAML frontmatter")
        })?
    } else {
        content.as_str()
    };

    serde_yaml::from_str(yaml).map_err(|e| CatalogError::parse(path, e))
}

/// Extract YAML frontmatter between the leading `---` fences
pub fn extract_frontmatter(content: &str) -> Option<&str> {
    let rest = content.trim_start().strip_prefix("---")?;
    let end = rest.find("\n---")?;
    Some(rest[..end].trim())
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Collect definition files under `dir`, sorted for deterministic load order.
/// A missing directory yields no files.
fn definition_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    if dir.exists() {
        collect_files(dir, &mut files)?;
    }
    files.sort();
    Ok(files)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }

        if path.is_dir() {
            collect_files(&path, files)?;
        } else if EXTENSIONS.iter().any(|ext| has_extension(&path, ext)) {
            files.push(path);
        }
    }
    Ok(())
}
