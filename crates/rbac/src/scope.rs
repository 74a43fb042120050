//! Scope evaluation - matching paths against declared access entries

use glob::{MatchOptions, Pattern};
use shared::Scope;

const GLOB_META: &[char] = &['*', '?', '['];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Debug, Clone)]
enum EntryKind {
    Literal,
    Glob(Pattern),
    Invalid(String),
}

/// One path-like scope entry, either a literal path or a glob pattern.
///
/// Granting a path grants everything below it: `reports/` and `reports/*`
/// both match `reports/q1/summary.md`.
#[derive(Debug, Clone)]
pub struct ScopeEntry {
    raw: String,
    normalized: String,
    kind: EntryKind,
}

impl ScopeEntry {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize(&raw);
        let kind = if normalized.contains(GLOB_META) {
            match Pattern::new(&normalized) {
                Ok(pattern) => EntryKind::Glob(pattern),
                Err(e) => EntryKind::Invalid(e.msg.to_string()),
            }
        } else {
            EntryKind::Literal
        };

        Self { raw, normalized, kind }
    }

    /// Entry as written in the definition
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_glob(&self) -> bool {
        matches!(self.kind, EntryKind::Glob(_))
    }

    /// Pattern error, if the entry is a malformed glob
    pub fn error(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::Invalid(msg) => Some(msg),
            _ => None,
        }
    }

    /// Check if the entry matches every path
    pub fn is_universal(&self) -> bool {
        matches!(self.normalized.as_str(), "" | "*" | "**" | "**/*")
    }

    /// Literal part of the entry, up to the first component holding a glob character
    pub fn base(&self) -> String {
        self.normalized
            .split('/')
            .take_while(|c| !c.contains(GLOB_META))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Check if a path is granted by this entry
    pub fn matches(&self, path: &str) -> bool {
        if self.is_universal() {
            return true;
        }

        let path = normalize(path);
        match &self.kind {
            EntryKind::Literal => is_within(&path, &self.normalized),
            EntryKind::Glob(pattern) => {
                ancestors(&path).any(|p| pattern.matches_with(p, MATCH_OPTIONS))
            }
            EntryKind::Invalid(_) => false,
        }
    }

    /// Check if every path `other` can grant is also granted by this entry.
    ///
    /// Conservative: a `false` may still hide an overlap, a `true` never
    /// over-grants.
    pub fn covers(&self, other: &ScopeEntry) -> bool {
        if other.error().is_some() {
            return false;
        }
        if self.is_universal() || self == other {
            return true;
        }

        if let (EntryKind::Glob(pattern), EntryKind::Glob(_)) = (&self.kind, &other.kind) {
            // A `*` in `other` stands for any text within one component,
            // which a `*` in `self` absorbs as well.
            if star_only(&self.normalized)
                && star_only(&other.normalized)
                && !other.normalized.contains("**")
                && ancestors(&other.normalized).any(|p| pattern.matches_with(p, MATCH_OPTIONS))
            {
                return true;
            }
        }

        let base = other.base();
        if base.is_empty() {
            return false;
        }
        self.matches(&base)
    }
}

impl PartialEq for ScopeEntry {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

/// Compiled access and modify entries of a scope
#[derive(Debug, Clone, Default)]
pub struct ScopeRules {
    access: Vec<ScopeEntry>,
    modify: Vec<ScopeEntry>,
}

impl ScopeRules {
    pub fn new(scope: &Scope) -> Self {
        Self {
            access: scope.can_access.iter().map(ScopeEntry::new).collect(),
            modify: scope.can_modify.iter().map(ScopeEntry::new).collect(),
        }
    }

    pub fn access_entries(&self) -> &[ScopeEntry] {
        &self.access
    }

    pub fn modify_entries(&self) -> &[ScopeEntry] {
        &self.modify
    }

    /// Check if the scope declares read access. Modify implies read.
    pub fn can_access(&self, path: &str) -> bool {
        self.access_entry_for(path).is_some() || self.modify_entry_for(path).is_some()
    }

    /// Check if the scope declares write access
    pub fn can_modify(&self, path: &str) -> bool {
        self.modify_entry_for(path).is_some()
    }

    /// First access entry granting `path`
    pub fn access_entry_for(&self, path: &str) -> Option<&ScopeEntry> {
        self.access.iter().find(|e| e.matches(path))
    }

    /// First modify entry granting `path`
    pub fn modify_entry_for(&self, path: &str) -> Option<&ScopeEntry> {
        self.modify.iter().find(|e| e.matches(path))
    }

    /// Check if some access entry covers `entry`
    pub fn access_covers(&self, entry: &ScopeEntry) -> bool {
        self.access.iter().any(|a| a.covers(entry))
    }
}

/// Strip `./` prefixes and trailing slashes
fn normalize(path: &str) -> String {
    let mut path = path.trim();
    while let Some(rest) = path.strip_prefix("./") {
        path = rest;
    }
    if path == "." {
        return String::new();
    }
    if path.len() > 1 {
        path = path.trim_end_matches('/');
    }
    path.to_string()
}

/// Glob whose only meta-character is `*`
fn star_only(pattern: &str) -> bool {
    !pattern.contains(&['?', '['][..])
}

/// Check if `path` equals `base` or lies below it
fn is_within(path: &str, base: &str) -> bool {
    if base.is_empty() {
        return true;
    }
    match path.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || base.ends_with('/'),
        None => false,
    }
}

/// `a/b/c` -> `a`, `a/b`, `a/b/c`
fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    path.char_indices()
        .filter(|&(i, c)| c == '/' && i > 0)
        .map(move |(i, _)| &path[..i])
        .chain(std::iter::once(path))
}
