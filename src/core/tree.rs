//! Dependency tree visualization
//!
//! Renders the library dependency graph as an indented tree or in DOT
//! format. Units reached more than once render with a `(*)` marker instead
//! of expanding again.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::library::LibraryUnit;
use crate::core::manifest::Manifest;

/// Renderable dependency tree
#[derive(Debug, Default)]
pub struct DependencyTree {
    /// Unit -> direct dependency names
    dependencies: BTreeMap<String, Vec<String>>,
    /// Roots to render from (the project's direct libraries)
    roots: Vec<String>,
    /// Project name used as the tree header
    project: String,
}

impl DependencyTree {
    /// Build a tree from the manifest and loaded units
    pub fn new(manifest: &Manifest, units: &BTreeMap<String, LibraryUnit>) -> Self {
        let dependencies = units
            .iter()
            .map(|(name, unit)| (name.clone(), unit.deps.clone()))
            .collect();
        Self {
            dependencies,
            roots: manifest.project.libraries.clone(),
            project: manifest.project.name.clone(),
        }
    }

    /// Restrict rendering to a single unit as root
    pub fn rooted_at(mut self, unit: &str) -> Self {
        self.project = unit.to_string();
        self.roots = self
            .dependencies
            .get(unit)
            .cloned()
            .unwrap_or_default();
        self
    }

    /// Whether a unit is known to the tree
    pub fn contains(&self, unit: &str) -> bool {
        self.dependencies.contains_key(unit)
    }

    /// Render as an indented text tree
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.project);
        out.push('\n');

        let mut seen = BTreeSet::new();
        for (index, root) in self.roots.iter().enumerate() {
            let last = index == self.roots.len() - 1;
            self.render_node(root, "", last, &mut seen, &mut out);
        }
        out
    }

    fn render_node(
        &self,
        node: &str,
        prefix: &str,
        last: bool,
        seen: &mut BTreeSet<String>,
        out: &mut String,
    ) {
        let connector = if last { "└── " } else { "├── " };
        let repeat = !seen.insert(node.to_string());
        let marker = if repeat { " (*)" } else { "" };
        out.push_str(&format!("{prefix}{connector}{node}{marker}\n"));

        if repeat {
            return;
        }

        let children = self.dependencies.get(node).cloned().unwrap_or_default();
        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        for (index, child) in children.iter().enumerate() {
            let child_last = index == children.len() - 1;
            self.render_node(child, &child_prefix, child_last, seen, out);
        }
    }

    /// Render as a DOT digraph
    pub fn render_dot(&self) -> String {
        let mut out = String::from("digraph dependencies {\n");
        out.push_str("    rankdir=LR;\n");
        for root in &self.roots {
            out.push_str(&format!("    \"{}\" -> \"{root}\";\n", self.project));
        }
        for (unit, deps) in &self.dependencies {
            for dep in deps {
                out.push_str(&format!("    \"{unit}\" -> \"{dep}\";\n"));
            }
        }
        out.push_str("}\n");
        out
    }
}
