//! Delegation queries over declared `allowed_subagents` lists

use catalog::Catalog;
use shared::AgentNotFoundError;
use std::collections::{BTreeMap, HashSet, VecDeque};

/// Directed graph of enabled delegations (delegator -> subagents)
#[derive(Debug, Clone, Default)]
pub struct DelegationGraph {
    edges: BTreeMap<String, Vec<String>>,
}

impl DelegationGraph {
    /// Build the graph from every agent with delegation enabled
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let edges = catalog
            .agents()
            .filter(|a| a.delegates())
            .map(|a| (a.name.clone(), a.allowed_subagents().to_vec()))
            .collect();
        Self { edges }
    }

    /// Direct subagents declared by `from`
    pub fn subagents(&self, from: &str) -> &[String] {
        self.edges.get(from).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Agents that declare `to` as a subagent
    pub fn delegators_of(&self, to: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|(_, subs)| subs.iter().any(|s| s == to))
            .map(|(from, _)| from.as_str())
            .collect()
    }

    /// Every agent reachable from `from` through delegation, breadth-first
    pub fn reachable_from(&self, from: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::from([from]);
        let mut queue: VecDeque<&str> = VecDeque::from([from]);
        let mut reached = Vec::new();

        while let Some(current) = queue.pop_front() {
            for next in self.subagents(current) {
                if seen.insert(next.as_str()) {
                    reached.push(next.clone());
                    queue.push_back(next.as_str());
                }
            }
        }
        reached
    }

    pub fn edges(&self) -> &BTreeMap<String, Vec<String>> {
        &self.edges
    }
}

/// Check if `from` declares delegation to `to`.
///
/// Only the declaration is evaluated; `to` need not exist.
pub fn can_delegate(catalog: &Catalog, from: &str, to: &str) -> Result<bool, AgentNotFoundError> {
    Ok(catalog.require_agent(from)?.may_delegate_to(to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AgentDefinition, Delegation};

    fn catalog() -> Catalog {
        let mut paused = AgentDefinition::new("paused", "Paused");
        paused.delegation = Some(Delegation {
            enabled: false,
            allowed_subagents: vec!["writer".to_string()],
        });

        Catalog::from_definitions(
            vec![
                AgentDefinition::new("lead", "Lead")
                    .with_delegation(vec!["researcher".to_string(), "writer".to_string()]),
                AgentDefinition::new("researcher", "Researcher")
                    .with_delegation(vec!["fact_checker".to_string(), "lead".to_string()]),
                AgentDefinition::new("writer", "Writer"),
                AgentDefinition::new("fact_checker", "Fact Checker"),
                paused,
            ],
            Vec::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_can_delegate() {
        let catalog = catalog();

        assert!(can_delegate(&catalog, "lead", "writer").unwrap());
        assert!(!can_delegate(&catalog, "writer", "lead").unwrap());
        assert!(!can_delegate(&catalog, "paused", "writer").unwrap());
        assert!(can_delegate(&catalog, "ghost", "writer").is_err());
    }

    #[test]
    fn test_graph_skips_disabled() {
        let graph = DelegationGraph::from_catalog(&catalog());

        assert!(graph.subagents("paused").is_empty());
        assert_eq!(graph.edges().len(), 2);
        assert_eq!(graph.delegators_of("writer"), vec!["lead"]);
        assert_eq!(graph.delegators_of("lead"), vec!["researcher"]);
    }

    #[test]
    fn test_reachable_is_cycle_safe() {
        let graph = DelegationGraph::from_catalog(&catalog());

        assert_eq!(
            graph.reachable_from("lead"),
            vec!["researcher", "writer", "fact_checker"]
        );
        assert!(graph.reachable_from("writer").is_empty());
    }
}
