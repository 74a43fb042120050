//! # agentdocs Lint
//!
//! Consistency checks for an agent catalog: unique and well-formed names,
//! resolvable `inherits_from` and subagent references, and `can_modify`
//! paths that stay inside the accessible scope.

pub mod report;
pub mod rules;

pub use report::{LintCode, LintIssue, LintReport, Severity};
pub use rules::Linter;
