//! The built dependency graph and the queries answered from it.

use std::collections::{HashMap, HashSet};
use std::fmt;

use cratewalk_core::filter::PackageFilter;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};

/// A package whose dependency list could not be fetched.
///
/// The package is still recorded in the graph, with no dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionFailure {
    pub package: String,
    pub cause: String,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.package, self.cause)
    }
}

/// A closed loop found during traversal. First and last entries are the same package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle(pub Vec<String>);

impl Cycle {
    pub fn packages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortState {
    InProgress,
    Done,
}

/// Forward graph, reverse index, cycles and failures accumulated by a
/// [`GraphBuilder`](crate::builder::GraphBuilder).
///
/// Only the builder can add to it; entries are never modified once recorded.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Forward-graph keys in visitation order.
    order: Vec<String>,
    forward: HashMap<String, Vec<String>>,
    reverse: HashMap<String, Vec<String>>,
    cycles: Vec<Cycle>,
    failures: Vec<ResolutionFailure>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fully visited package and its direct dependencies.
    pub(crate) fn record(&mut self, package: &str, dependencies: Vec<String>) {
        debug_assert!(
            !self.forward.contains_key(package),
            "{package} recorded twice"
        );
        for dep in &dependencies {
            self.reverse
                .entry(dep.clone())
                .or_default()
                .push(package.to_string());
        }
        self.order.push(package.to_string());
        self.forward.insert(package.to_string(), dependencies);
    }

    pub(crate) fn record_cycle(&mut self, cycle: Vec<String>) {
        self.cycles.push(Cycle(cycle));
    }

    pub(crate) fn record_failure(&mut self, package: &str, cause: String) {
        self.failures.push(ResolutionFailure {
            package: package.to_string(),
            cause,
        });
    }

    /// Direct dependencies recorded for `package`, or `None` if it was never visited.
    pub fn dependencies_of(&self, package: &str) -> Option<&[String]> {
        self.forward.get(package).map(Vec::as_slice)
    }

    /// Visited packages with their dependencies, in visitation order.
    pub fn packages(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.order
            .iter()
            .map(|p| (p.as_str(), self.forward[p].as_slice()))
    }

    pub fn contains(&self, package: &str) -> bool {
        self.forward.contains_key(package)
    }

    /// Number of visited packages.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn failures(&self) -> &[ResolutionFailure] {
        &self.failures
    }

    /// Packages observed listing `package` as a direct dependency.
    ///
    /// Reflects only what builds on this graph have seen so far.
    pub fn reverse_dependencies_of(&self, package: &str) -> &[String] {
        self.reverse.get(package).map_or(&[][..], Vec::as_slice)
    }

    /// Topological order of the subgraph reachable from `package`, dependencies first.
    ///
    /// A package reached again while it is still being ordered is skipped, which
    /// breaks cycles silently: inside a cycle the order is best effort only.
    /// Packages that were never visited are not part of the output.
    pub fn installation_order(&self, package: &str) -> Vec<String> {
        let mut order = Vec::new();
        let Some((root, _)) = self.forward.get_key_value(package) else {
            return order;
        };

        let mut state: HashMap<&str, SortState> = HashMap::new();
        let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
        state.insert(root.as_str(), SortState::InProgress);

        while let Some(top) = stack.last_mut() {
            let deps = self.forward.get(top.0).map_or(&[][..], Vec::as_slice);
            if let Some(child) = deps.get(top.1) {
                top.1 += 1;
                let Some((child, _)) = self.forward.get_key_value(child.as_str()) else {
                    continue;
                };
                if !state.contains_key(child.as_str()) {
                    state.insert(child.as_str(), SortState::InProgress);
                    stack.push((child.as_str(), 0));
                }
            } else if let Some((node, _)) = stack.pop() {
                debug_assert_eq!(state.get(node), Some(&SortState::InProgress));
                state.insert(node, SortState::Done);
                order.push(node.to_string());
            }
        }

        order
    }

    /// Render the graph as a tree rooted at `root`.
    ///
    /// Identifiers excluded by `filter` are hidden. A package already expanded
    /// elsewhere in the tree is printed once more with a `(*)` marker.
    pub fn print_tree(&self, root: &str, filter: &PackageFilter) -> String {
        let mut output = String::new();
        if !self.contains(root) {
            return output;
        }
        output.push_str(&format!("{root}\n"));

        let mut expanded = HashSet::new();
        expanded.insert(root.to_string());

        let deps = self.visible_dependencies(root, filter);
        let count = deps.len();
        for (i, dep) in deps.iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(&mut output, dep, "", is_last, filter, &mut expanded);
        }

        output
    }

    fn print_subtree(
        &self,
        output: &mut String,
        package: &str,
        prefix: &str,
        is_last: bool,
        filter: &PackageFilter,
        expanded: &mut HashSet<String>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let deps = self.visible_dependencies(package, filter);

        if !deps.is_empty() && !expanded.insert(package.to_string()) {
            output.push_str(&format!("{prefix}{connector}{package} (*)\n"));
            return;
        }
        output.push_str(&format!("{prefix}{connector}{package}\n"));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let count = deps.len();
        for (i, dep) in deps.iter().enumerate() {
            let is_last = i == count - 1;
            self.print_subtree(output, dep, &child_prefix, is_last, filter, expanded);
        }
    }

    fn visible_dependencies<'a>(&'a self, package: &str, filter: &PackageFilter) -> Vec<&'a str> {
        self.dependencies_of(package)
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .filter(|dep| !filter.excludes(dep))
            .collect()
    }

    /// Render the recorded edges as a Graphviz DOT document.
    pub fn to_dot(&self, filter: &PackageFilter) -> String {
        let mut graph: DiGraph<&str, &str> = DiGraph::new();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();

        for (package, _) in self.packages() {
            nodes
                .entry(package)
                .or_insert_with(|| graph.add_node(package));
        }
        for (package, _) in self.packages() {
            let from = nodes[package];
            for dep in self.visible_dependencies(package, filter) {
                let to = *nodes.entry(dep).or_insert_with(|| graph.add_node(dep));
                graph.add_edge(from, to, "");
            }
        }

        format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}
