//! Resolver - Inheritance chains and effective scope

use crate::scope::ScopeRules;
use catalog::Catalog;
use serde::Serialize;
use shared::{AgentDefinition, AgentNotFoundError, Scope};
use std::collections::HashSet;

/// A scope path together with the record that declared it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectiveEntry {
    pub path: String,
    /// Agent or template name
    pub origin: String,
}

/// Agent definition with inheritance applied
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAgent {
    pub definition: AgentDefinition,
    /// Agent name followed by each resolved template, nearest first
    pub chain: Vec<String>,
    /// First `inherits_from` name that does not resolve
    pub unresolved_parent: Option<String>,
    pub can_access: Vec<EffectiveEntry>,
    pub can_modify: Vec<EffectiveEntry>,
}

impl ResolvedAgent {
    pub fn effective_scope(&self) -> Scope {
        Scope {
            can_access: self.can_access.iter().map(|e| e.path.clone()).collect(),
            can_modify: self.can_modify.iter().map(|e| e.path.clone()).collect(),
        }
    }

    pub fn rules(&self) -> ScopeRules {
        ScopeRules::new(&self.effective_scope())
    }
}

/// Resolver walks `inherits_from` links through the catalog's templates
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Resolve an agent's chain and effective scope
    pub fn resolve(&self, name: &str) -> Result<ResolvedAgent, AgentNotFoundError> {
        let agent = self.catalog.require_agent(name)?;
        let chain = self.inheritance_chain(name);

        let mut can_access = Vec::new();
        let mut can_modify = Vec::new();
        for (origin, scope) in self.scopes_along(&chain) {
            push_unique(&mut can_access, &scope.can_access, origin);
            push_unique(&mut can_modify, &scope.can_modify, origin);
        }

        Ok(ResolvedAgent {
            definition: agent.clone(),
            unresolved_parent: self.unresolved_parent(name),
            chain,
            can_access,
            can_modify,
        })
    }

    /// Get the inheritance chain for an agent: the agent itself, then each
    /// template it reaches. Stops at the first unresolved name or on a cycle.
    pub fn inheritance_chain(&self, name: &str) -> Vec<String> {
        let Some(agent) = self.catalog.agent(name) else {
            return Vec::new();
        };

        let mut chain = vec![agent.name.clone()];
        let mut visited = HashSet::new();
        if let Some(parent) = &agent.inherits_from {
            self.collect_template_chain(parent, &mut chain, &mut visited);
        }
        chain
    }

    fn collect_template_chain(
        &self,
        name: &str,
        chain: &mut Vec<String>,
        visited: &mut HashSet<String>,
    ) {
        if visited.contains(name) {
            return; // Circular inheritance protection
        }
        visited.insert(name.to_string());

        if let Some(template) = self.catalog.template(name) {
            chain.push(name.to_string());
            if let Some(parent) = &template.inherits_from {
                self.collect_template_chain(parent, chain, visited);
            }
        }
    }

    /// First name along the chain that names no template
    pub fn unresolved_parent(&self, name: &str) -> Option<String> {
        let agent = self.catalog.agent(name)?;
        let mut next = agent.inherits_from.clone();
        let mut visited = HashSet::new();

        while let Some(parent) = next {
            if !visited.insert(parent.clone()) {
                return None;
            }
            match self.catalog.template(&parent) {
                Some(template) => next = template.inherits_from.clone(),
                None => return Some(parent),
            }
        }
        None
    }

    /// Cycle in the template chain of an agent, e.g. `[a, b, a]`
    pub fn detect_cycle(&self, name: &str) -> Option<Vec<String>> {
        let agent = self.catalog.agent(name)?;
        self.template_cycle(agent.inherits_from.as_deref()?)
    }

    /// Cycle reachable from a template, e.g. `[a, b, a]`
    pub fn template_cycle(&self, start: &str) -> Option<Vec<String>> {
        let mut path: Vec<String> = Vec::new();
        let mut current = Some(start.to_string());

        while let Some(name) = current {
            if let Some(pos) = path.iter().position(|n| *n == name) {
                let mut cycle = path[pos..].to_vec();
                cycle.push(name);
                return Some(cycle);
            }
            current = self
                .catalog
                .template(&name)
                .and_then(|t| t.inherits_from.clone());
            path.push(name);
        }
        None
    }

    /// Effective scope of an agent (own entries first, then ancestors nearest-first)
    pub fn effective_scope(&self, name: &str) -> Scope {
        self.resolve(name)
            .map(|r| r.effective_scope())
            .unwrap_or_default()
    }

    fn scopes_along<'c>(&self, chain: &'c [String]) -> Vec<(&'c str, &'a Scope)> {
        let mut scopes = Vec::with_capacity(chain.len());
        for (i, name) in chain.iter().enumerate() {
            let scope = if i == 0 {
                self.catalog.agent(name).map(|a| &a.scope)
            } else {
                self.catalog.template(name).map(|t| &t.scope)
            };
            if let Some(scope) = scope {
                scopes.push((name.as_str(), scope));
            }
        }
        scopes
    }
}

fn push_unique(into: &mut Vec<EffectiveEntry>, paths: &[String], origin: &str) {
    for path in paths {
        if !into.iter().any(|e| e.path == *path) {
            into.push(EffectiveEntry {
                path: path.clone(),
                origin: origin.to_string(),
            });
        }
    }
}
