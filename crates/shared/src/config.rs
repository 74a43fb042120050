//! Configuration types for agentdocs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "agentdocs.yaml";

/// Default trailing notice appended to every generated page
pub const DEFAULT_NOTICE: &str = "This file is auto-generated. Do not edit manually.";

/// Lint behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Treat warnings as failures
    pub deny_warnings: bool,

    /// Delegation targets must be declared as `Subagent`
    pub require_subagent_type: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            deny_warnings: false,
            require_subagent_type: true,
        }
    }
}

/// Project configuration (agentdocs.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding agent definitions
    pub agents_dir: PathBuf,

    /// Directory holding base templates
    pub templates_dir: PathBuf,

    /// Directory generated Markdown is written to
    pub output_dir: PathBuf,

    /// Also render a README.md index
    pub index: bool,

    /// Trailing generation notice
    pub notice: String,

    /// Append the generation date to the notice
    pub timestamp: bool,

    pub lint: LintConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            agents_dir: PathBuf::from("agents"),
            templates_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("docs/agents"),
            index: true,
            notice: DEFAULT_NOTICE.to_string(),
            timestamp: false,
            lint: LintConfig::default(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| crate::CatalogError::parse(path, e))?;
        Ok(config.relative_to(path.parent().unwrap_or_else(|| Path::new(""))))
    }

    /// Load configuration if the file exists, defaults otherwise.
    ///
    /// Defaults are resolved against the directory the file would live in.
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default().relative_to(path.parent().unwrap_or_else(|| Path::new(""))))
        }
    }

    /// Resolve relative directories against `base`
    pub fn relative_to(mut self, base: &Path) -> Self {
        for dir in [&mut self.agents_dir, &mut self.templates_dir, &mut self.output_dir] {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        self
    }

    /// Serialize to YAML (used by `init`)
    pub fn to_yaml(&self) -> crate::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_partial() {
        let yaml = r#"
output_dir: site/agents
lint:
  deny_warnings: true
"#;

        let config: CatalogConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("site/agents"));
        assert_eq!(config.agents_dir, PathBuf::from("agents"));
        assert!(config.lint.deny_warnings);
        assert!(config.lint.require_subagent_type);
        assert!(config.index);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CatalogConfig::load_or_default(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(config.agents_dir, dir.path().join("agents"));
        assert_eq!(config.notice, DEFAULT_NOTICE);
    }

    #[test]
    fn test_from_file_resolves_relative_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "agents_dir: defs\noutput_dir: /abs/out\n").unwrap();

        let config = CatalogConfig::from_file(&path).unwrap();
        assert_eq!(config.agents_dir, dir.path().join("defs"));
        assert_eq!(config.output_dir, PathBuf::from("/abs/out"));
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "index: [not, a, bool]\n").unwrap();

        let err = CatalogConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
