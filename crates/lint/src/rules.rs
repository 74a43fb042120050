//! Linter - Document-level consistency checks over a catalog

use crate::report::{LintCode, LintIssue, LintReport};
use catalog::Catalog;
use rbac::{Resolver, ScopeEntry, ScopeRules};
use regex::Regex;
use shared::{AgentDefinition, AgentType, LintConfig, Scope, TemplateDefinition};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;

/// Lowercase-snake-case identifiers
const NAME_PATTERN: &str = r"^[a-z][a-z0-9]*(_[a-z0-9]+)*$";

/// MAJOR.MINOR.PATCH with optional pre-release and build metadata
const VERSION_PATTERN: &str =
    r"^(0|[1-9]\d*)\.(0|[1-9]\d*)\.(0|[1-9]\d*)(-[0-9A-Za-z.-]+)?(\+[0-9A-Za-z.-]+)?$";

static NAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(NAME_PATTERN).ok());
static VERSION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(VERSION_PATTERN).ok());

/// Runs every consistency rule against a catalog
#[derive(Debug)]
pub struct Linter<'a> {
    catalog: &'a Catalog,
    resolver: Resolver<'a>,
    config: LintConfig,
}

impl<'a> Linter<'a> {
    pub fn new(catalog: &'a Catalog, config: LintConfig) -> Self {
        Self {
            catalog,
            resolver: Resolver::new(catalog),
            config,
        }
    }

    /// Lint every agent and template
    pub fn run(&self) -> LintReport {
        let mut report = LintReport {
            agents_checked: self.catalog.len(),
            templates_checked: self.catalog.templates().count(),
            ..Default::default()
        };

        for agent in self.catalog.agents() {
            self.check_agent(agent, &mut report.issues);
        }
        for template in self.catalog.templates() {
            self.check_template(template, &mut report.issues);
        }
        self.check_unused_templates(&mut report.issues);

        report.sort();
        debug!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "Lint finished"
        );
        report
    }

    /// Lint a single agent
    pub fn check_agent(&self, agent: &AgentDefinition, issues: &mut Vec<LintIssue>) {
        let name = agent.name.as_str();

        if !matches_pattern(&NAME_RE, name) {
            issues.push(LintIssue::new(
                LintCode::InvalidName,
                name,
                format!("'{}' is not lowercase-snake-case", name),
            ));
        }
        if !matches_pattern(&VERSION_RE, &agent.version) {
            issues.push(LintIssue::new(
                LintCode::InvalidVersion,
                name,
                format!("'{}' is not a semantic version", agent.version),
            ));
        }

        for (field, value) in [
            ("role", &agent.role),
            ("description", &agent.description),
            ("directive", &agent.directive),
        ] {
            if value.trim().is_empty() {
                issues.push(LintIssue::new(
                    LintCode::EmptyField,
                    name,
                    format!("{} is blank", field),
                ));
            }
        }

        self.check_inheritance(agent, issues);
        check_scope_lists(name, &agent.scope, issues);
        self.check_effective_scope(agent, issues);
        self.check_delegation(agent, issues);
    }

    fn check_inheritance(&self, agent: &AgentDefinition, issues: &mut Vec<LintIssue>) {
        if let Some(missing) = self.resolver.unresolved_parent(&agent.name) {
            let message = if agent.inherits_from.as_deref() == Some(missing.as_str()) {
                format!("inherits from unknown template '{}'", missing)
            } else {
                format!("inheritance chain reaches unknown template '{}'", missing)
            };
            issues.push(LintIssue::new(LintCode::UnresolvedInherits, &agent.name, message));
        }

        if let Some(cycle) = self.resolver.detect_cycle(&agent.name) {
            issues.push(LintIssue::new(
                LintCode::InheritanceCycle,
                &agent.name,
                format!("template chain loops: {}", cycle.join(" -> ")),
            ));
        }
    }

    fn check_effective_scope(&self, agent: &AgentDefinition, issues: &mut Vec<LintIssue>) {
        let Ok(resolved) = self.resolver.resolve(&agent.name) else {
            return;
        };
        let rules = resolved.rules();

        if rules.access_entries().is_empty() {
            issues.push(LintIssue::new(
                LintCode::EmptyAccess,
                &agent.name,
                "declares no readable paths, directly or through inheritance",
            ));
        }

        for (entry, effective) in rules.modify_entries().iter().zip(&resolved.can_modify) {
            if entry.error().is_some() || rules.access_covers(entry) {
                continue;
            }
            let origin = if effective.origin == agent.name {
                String::new()
            } else {
                format!(" (inherited from '{}')", effective.origin)
            };
            issues.push(LintIssue::new(
                LintCode::ModifyOutsideAccess,
                &agent.name,
                format!(
                    "can modify '{}'{} but no accessible path covers it",
                    entry.raw(),
                    origin
                ),
            ));
        }
    }

    fn check_delegation(&self, agent: &AgentDefinition, issues: &mut Vec<LintIssue>) {
        let Some(delegation) = &agent.delegation else {
            return;
        };
        let name = agent.name.as_str();

        if !delegation.enabled {
            if !delegation.allowed_subagents.is_empty() {
                issues.push(LintIssue::new(
                    LintCode::SubagentsWithoutDelegation,
                    name,
                    format!(
                        "lists {} subagent(s) but delegation is disabled",
                        delegation.allowed_subagents.len()
                    ),
                ));
            }
            return;
        }

        let mut seen = HashSet::new();
        for subagent in &delegation.allowed_subagents {
            if !seen.insert(subagent.as_str()) {
                continue;
            }
            if subagent == name {
                issues.push(LintIssue::new(
                    LintCode::SelfDelegation,
                    name,
                    "lists itself as an allowed subagent",
                ));
                continue;
            }
            match self.catalog.agent(subagent) {
                None => issues.push(LintIssue::new(
                    LintCode::UnresolvedSubagent,
                    name,
                    format!("allowed subagent '{}' does not exist", subagent),
                )),
                Some(target)
                    if self.config.require_subagent_type
                        && target.agent_type == AgentType::MainAgent =>
                {
                    issues.push(LintIssue::new(
                        LintCode::DelegationToMainAgent,
                        name,
                        format!("allowed subagent '{}' is declared as a Main Agent", subagent),
                    ))
                }
                Some(_) => {}
            }
        }
    }

    /// Lint a single template
    pub fn check_template(&self, template: &TemplateDefinition, issues: &mut Vec<LintIssue>) {
        let name = template.name.as_str();

        if !matches_pattern(&NAME_RE, name) {
            issues.push(LintIssue::new(
                LintCode::InvalidName,
                name,
                format!("template '{}' is not lowercase-snake-case", name),
            ));
        }
        if let Some(parent) = &template.inherits_from {
            if !self.catalog.has_template(parent) {
                issues.push(LintIssue::new(
                    LintCode::UnresolvedInherits,
                    name,
                    format!("template inherits from unknown template '{}'", parent),
                ));
            }
        }
        if let Some(cycle) = self.resolver.template_cycle(name) {
            if cycle.first().map(String::as_str) == Some(name) {
                issues.push(LintIssue::new(
                    LintCode::InheritanceCycle,
                    name,
                    format!("template chain loops: {}", cycle.join(" -> ")),
                ));
            }
        }
        check_scope_lists(name, &template.scope, issues);
    }

    fn check_unused_templates(&self, issues: &mut Vec<LintIssue>) {
        let used: HashSet<String> = self
            .catalog
            .agents()
            .flat_map(|a| self.resolver.inheritance_chain(&a.name).into_iter().skip(1))
            .collect();

        for template in self.catalog.templates() {
            if !used.contains(&template.name) {
                issues.push(LintIssue::new(
                    LintCode::UnusedTemplate,
                    &template.name,
                    "no agent inherits from this template",
                ));
            }
        }
    }
}

/// Checks that only need a record's own scope lists
fn check_scope_lists(subject: &str, scope: &Scope, issues: &mut Vec<LintIssue>) {
    let rules = ScopeRules::new(scope);

    for (list, entries) in [
        ("can_access", rules.access_entries()),
        ("can_modify", rules.modify_entries()),
    ] {
        let mut seen: Vec<&ScopeEntry> = Vec::new();
        for entry in entries {
            if let Some(err) = entry.error() {
                issues.push(LintIssue::new(
                    LintCode::InvalidScopePattern,
                    subject,
                    format!("{} entry '{}' is not a valid pattern: {}", list, entry.raw(), err),
                ));
            }
            if seen.contains(&entry) {
                issues.push(LintIssue::new(
                    LintCode::DuplicateScopeEntry,
                    subject,
                    format!("{} lists '{}' more than once", list, entry.raw()),
                ));
            } else {
                seen.push(entry);
            }
        }
    }
}

/// Regex match; an invalid pattern never matches
fn matches_pattern(regex: &Option<Regex>, text: &str) -> bool {
    regex.as_ref().map(|r| r.is_match(text)).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Delegation;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn complete(name: &str) -> AgentDefinition {
        AgentDefinition::new(name, "Role")
            .with_description("Does things.")
            .with_directive("Do the thing.")
            .with_access(strings(&["shared/"]))
    }

    fn lint(agents: Vec<AgentDefinition>, templates: Vec<TemplateDefinition>) -> LintReport {
        let catalog = Catalog::from_definitions(agents, templates).unwrap();
        Linter::new(&catalog, LintConfig::default()).run()
    }

    #[test]
    fn test_clean_catalog() {
        let report = lint(
            vec![
                complete("lead").with_delegation(strings(&["helper"])),
                complete("helper")
                    .with_type(AgentType::Subagent)
                    .inherits_from("base")
                    .with_modify(strings(&["content/drafts/"])),
            ],
            vec![TemplateDefinition::new("base").with_access(strings(&["content/"]))],
        );

        assert!(report.issues.is_empty(), "{:?}", report.issues);
        assert!(report.is_clean(true));
        assert_eq!(report.agents_checked, 2);
        assert_eq!(report.templates_checked, 1);
    }

    #[test]
    fn test_invalid_name_and_version() {
        let report = lint(
            vec![
                complete("FinancialAnalyst").with_version("v1"),
                complete("content_writer_2").with_version("1.2.3-beta.1"),
            ],
            Vec::new(),
        );

        assert!(report.has("FinancialAnalyst", LintCode::InvalidName));
        assert!(report.has("FinancialAnalyst", LintCode::InvalidVersion));
        assert!(report.issues_for("content_writer_2").is_empty());
    }

    #[test]
    fn test_unresolved_inherits() {
        let report = lint(
            vec![
                complete("orphan").inherits_from("missing"),
                complete("deep").inherits_from("middle"),
            ],
            vec![TemplateDefinition::new("middle").inherits_from("gone")],
        );

        assert!(report.has("orphan", LintCode::UnresolvedInherits));
        assert!(report.has("deep", LintCode::UnresolvedInherits));
        assert!(report.has("middle", LintCode::UnresolvedInherits));
        assert_eq!(report.error_count(), 3);
    }

    #[test]
    fn test_inheritance_cycle_reported_once_per_template() {
        let report = lint(
            vec![complete("looped").inherits_from("a")],
            vec![
                TemplateDefinition::new("a").inherits_from("b"),
                TemplateDefinition::new("b").inherits_from("a"),
            ],
        );

        assert!(report.has("looped", LintCode::InheritanceCycle));
        assert!(report.has("a", LintCode::InheritanceCycle));
        assert!(report.has("b", LintCode::InheritanceCycle));
        assert!(!report.has("looped", LintCode::UnresolvedInherits));
    }

    #[test]
    fn test_delegation_rules() {
        let mut paused = complete("paused");
        paused.delegation = Some(Delegation {
            enabled: false,
            allowed_subagents: strings(&["helper"]),
        });

        let report = lint(
            vec![
                complete("lead").with_delegation(strings(&["lead", "ghost", "boss", "ghost"])),
                complete("boss"),
                complete("helper").with_type(AgentType::Subagent),
                paused,
            ],
            Vec::new(),
        );

        assert!(report.has("lead", LintCode::SelfDelegation));
        assert!(report.has("lead", LintCode::UnresolvedSubagent));
        assert!(report.has("lead", LintCode::DelegationToMainAgent));
        assert!(report.has("paused", LintCode::SubagentsWithoutDelegation));
        assert_eq!(
            report
                .issues_for("lead")
                .iter()
                .filter(|i| i.code == LintCode::UnresolvedSubagent)
                .count(),
            1
        );
    }

    #[test]
    fn test_main_agent_target_allowed_when_configured() {
        let catalog = Catalog::from_definitions(
            vec![complete("lead").with_delegation(strings(&["boss"])), complete("boss")],
            Vec::new(),
        )
        .unwrap();
        let config = LintConfig {
            require_subagent_type: false,
            ..Default::default()
        };

        assert!(Linter::new(&catalog, config).run().issues.is_empty());
    }

    #[test]
    fn test_modify_outside_access() {
        let report = lint(
            vec![
                complete("editor").with_modify(strings(&["content/published/", "shared/notes/"])),
                complete("heir").inherits_from("writable"),
            ],
            vec![TemplateDefinition::new("writable").with_modify(strings(&["secrets/"]))],
        );

        let editor = report.issues_for("editor");
        assert_eq!(editor.len(), 1);
        assert_eq!(editor[0].code, LintCode::ModifyOutsideAccess);
        assert!(editor[0].message.contains("content/published/"));

        let heir = report.issues_for("heir");
        assert!(heir
            .iter()
            .any(|i| i.code == LintCode::ModifyOutsideAccess
                && i.message.contains("inherited from 'writable'")));
    }

    #[test]
    fn test_modify_globs_covered_by_access_globs() {
        let report = lint(
            vec![
                complete("writer")
                    .with_access(strings(&["content/*.md"]))
                    .with_modify(strings(&["content/*.md"])),
                complete("publisher")
                    .with_access(strings(&["content/*"]))
                    .with_modify(strings(&["content/*.md"])),
                complete("narrow")
                    .with_access(strings(&["content/*.md"]))
                    .with_modify(strings(&["content/*"])),
            ],
            Vec::new(),
        );

        assert!(report.issues_for("writer").is_empty(), "{:?}", report.issues);
        assert!(report.issues_for("publisher").is_empty(), "{:?}", report.issues);
        assert!(report.has("narrow", LintCode::ModifyOutsideAccess));
    }

    #[test]
    fn test_scope_list_checks() {
        let report = lint(
            vec![complete("messy").with_access(strings(&["data/", "./data", "data/[x"]))],
            Vec::new(),
        );

        assert!(report.has("messy", LintCode::DuplicateScopeEntry));
        assert!(report.has("messy", LintCode::InvalidScopePattern));
    }

    #[test]
    fn test_empty_fields_and_access() {
        let report = lint(vec![AgentDefinition::new("bare", "")], Vec::new());

        let empty_fields = report
            .issues_for("bare")
            .iter()
            .filter(|i| i.code == LintCode::EmptyField)
            .count();
        assert_eq!(empty_fields, 3);
        assert!(report.has("bare", LintCode::EmptyAccess));
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn test_unused_template() {
        let report = lint(
            vec![complete("a").inherits_from("used")],
            vec![
                TemplateDefinition::new("used").inherits_from("grandparent"),
                TemplateDefinition::new("grandparent"),
                TemplateDefinition::new("stale"),
            ],
        );

        assert!(report.has("stale", LintCode::UnusedTemplate));
        assert!(!report.has("used", LintCode::UnusedTemplate));
        assert!(!report.has("grandparent", LintCode::UnusedTemplate));
    }

    #[test]
    fn test_name_pattern() {
        for ok in ["a", "analyst", "ux_researcher", "tier2_support"] {
            assert!(matches_pattern(&NAME_RE, ok), "{ok}");
        }
        for bad in ["", "_lead", "lead_", "Lead", "ux-researcher", "a__b", "2fa"] {
            assert!(!matches_pattern(&NAME_RE, bad), "{bad}");
        }
    }
}
