//! Lint issues and reports

use serde::Serialize;
use std::fmt;

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Stable identifiers for each consistency rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintCode {
    InvalidName,
    InvalidVersion,
    UnresolvedInherits,
    InheritanceCycle,
    UnresolvedSubagent,
    SelfDelegation,
    ModifyOutsideAccess,
    InvalidScopePattern,
    SubagentsWithoutDelegation,
    DelegationToMainAgent,
    EmptyAccess,
    EmptyField,
    DuplicateScopeEntry,
    UnusedTemplate,
}

impl LintCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LintCode::InvalidName => "invalid-name",
            LintCode::InvalidVersion => "invalid-version",
            LintCode::UnresolvedInherits => "unresolved-inherits",
            LintCode::InheritanceCycle => "inheritance-cycle",
            LintCode::UnresolvedSubagent => "unresolved-subagent",
            LintCode::SelfDelegation => "self-delegation",
            LintCode::ModifyOutsideAccess => "modify-outside-access",
            LintCode::InvalidScopePattern => "invalid-scope-pattern",
            LintCode::SubagentsWithoutDelegation => "subagents-without-delegation",
            LintCode::DelegationToMainAgent => "delegation-to-main-agent",
            LintCode::EmptyAccess => "empty-access",
            LintCode::EmptyField => "empty-field",
            LintCode::DuplicateScopeEntry => "duplicate-scope-entry",
            LintCode::UnusedTemplate => "unused-template",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            LintCode::InvalidName
            | LintCode::InvalidVersion
            | LintCode::UnresolvedInherits
            | LintCode::InheritanceCycle
            | LintCode::UnresolvedSubagent
            | LintCode::SelfDelegation
            | LintCode::ModifyOutsideAccess
            | LintCode::InvalidScopePattern => Severity::Error,
            LintCode::SubagentsWithoutDelegation
            | LintCode::DelegationToMainAgent
            | LintCode::EmptyAccess
            | LintCode::EmptyField
            | LintCode::DuplicateScopeEntry
            | LintCode::UnusedTemplate => Severity::Warning,
        }
    }
}

impl fmt::Display for LintCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One finding against an agent or template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    pub severity: Severity,
    pub code: LintCode,
    /// Agent or template name
    pub subject: String,
    pub message: String,
}

impl LintIssue {
    pub fn new(code: LintCode, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LintIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.subject, self.message
        )
    }
}

/// Result of linting a catalog
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    pub issues: Vec<LintIssue>,
    pub agents_checked: usize,
    pub templates_checked: usize,
}

impl LintReport {
    /// Sort issues by subject, then errors before warnings, then code
    pub fn sort(&mut self) {
        self.issues.sort_by(|a, b| {
            a.subject
                .cmp(&b.subject)
                .then(a.severity.cmp(&b.severity))
                .then(a.code.cmp(&b.code))
                .then(a.message.cmp(&b.message))
        });
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// Check if the report passes, optionally failing on warnings
    pub fn is_clean(&self, deny_warnings: bool) -> bool {
        self.error_count() == 0 && (!deny_warnings || self.warning_count() == 0)
    }

    /// Issues for one agent or template
    pub fn issues_for(&self, subject: &str) -> Vec<&LintIssue> {
        self.issues.iter().filter(|i| i.subject == subject).collect()
    }

    pub fn has(&self, subject: &str, code: LintCode) -> bool {
        self.issues.iter().any(|i| i.subject == subject && i.code == code)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
