//! Dependency resolution
//!
//! Represents library dependencies as an explicit graph, rejects cycles and
//! missing references before any aggregation, and computes the transitive
//! archive set for a unit or project root. The transitive set is a set keyed
//! by unit name: a diamond-shaped graph contributes its shared ancestor
//! exactly once regardless of how many paths reach it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::core::library::LibraryUnit;
use crate::error::ResolverError;

/// Dependency graph over library units
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Adjacency list: unit -> direct dependencies
    edges: HashMap<String, Vec<String>>,
    /// All declared units
    nodes: HashSet<String>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from loaded library units
    pub fn from_units(units: &BTreeMap<String, LibraryUnit>) -> Self {
        let mut graph = Self::new();
        for unit in units.values() {
            graph.add_unit(&unit.name, unit.deps.clone());
        }
        graph
    }

    /// Add a unit and its direct dependencies to the graph
    ///
    /// Only the unit itself becomes a declared node; dependencies must be
    /// declared through their own `add_unit` call or they are reported as
    /// missing by [`DependencyGraph::verify`].
    pub fn add_unit(&mut self, name: &str, dependencies: Vec<String>) {
        self.nodes.insert(name.to_string());
        self.edges.insert(name.to_string(), dependencies);
    }

    /// Check that every referenced dependency is declared
    pub fn verify(&self) -> Result<(), ResolverError> {
        for (unit, deps) in &self.edges {
            for dep in deps {
                if !self.nodes.contains(dep) {
                    return Err(ResolverError::MissingDependency {
                        library: unit.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Fail with the cycle path if the graph contains a cycle
    pub fn check_acyclic(&self) -> Result<(), ResolverError> {
        let mut visited = HashSet::new();
        let mut in_progress = HashSet::new();
        let mut cycle_path = Vec::new();

        // Deterministic visit order for stable cycle reports
        let mut nodes: Vec<&String> = self.nodes.iter().collect();
        nodes.sort();

        for node in nodes {
            if !visited.contains(node) {
                self.visit(node, &mut visited, &mut in_progress, &mut cycle_path)?;
            }
        }
        Ok(())
    }

    fn visit(
        &self,
        node: &str,
        visited: &mut HashSet<String>,
        in_progress: &mut HashSet<String>,
        cycle_path: &mut Vec<String>,
    ) -> Result<(), ResolverError> {
        if in_progress.contains(node) {
            cycle_path.push(node.to_string());
            return Err(ResolverError::CyclicDependency {
                cycle: cycle_path.clone(),
            });
        }
        if visited.contains(node) {
            return Ok(());
        }

        in_progress.insert(node.to_string());
        cycle_path.push(node.to_string());

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                self.visit(dep, visited, in_progress, cycle_path)?;
            }
        }

        cycle_path.pop();
        in_progress.remove(node);
        visited.insert(node.to_string());
        Ok(())
    }

    /// Whether the graph has any cycle
    pub fn has_cycle(&self) -> bool {
        self.check_acyclic().is_err()
    }

    /// Collect the transitive set of units reachable from one unit
    ///
    /// Includes the unit itself. The graph must already be verified and
    /// acyclic; diamond dependencies collapse to a single entry.
    pub fn collect_transitive(&self, name: &str) -> Result<BTreeSet<String>, ResolverError> {
        self.collect_transitive_from(std::iter::once(name))
    }

    /// Collect the transitive set reachable from a project's direct
    /// dependencies (the roots themselves are included)
    pub fn collect_transitive_from<'a>(
        &self,
        roots: impl IntoIterator<Item = &'a str>,
    ) -> Result<BTreeSet<String>, ResolverError> {
        self.verify()?;
        self.check_acyclic()?;

        let mut reachable = BTreeSet::new();
        let mut stack: Vec<String> = roots.into_iter().map(str::to_string).collect();

        while let Some(node) = stack.pop() {
            if !self.nodes.contains(&node) {
                // Project roots reference units that were never declared
                return Err(ResolverError::MissingDependency {
                    library: "project".to_string(),
                    dependency: node,
                });
            }
            if !reachable.insert(node.clone()) {
                continue;
            }
            if let Some(deps) = self.edges.get(&node) {
                stack.extend(deps.iter().cloned());
            }
        }

        Ok(reachable)
    }
}
