//! Depth-first graph construction from a root package.
//!
//! Every candidate popped off the walk stack goes through the same checks, in
//! order: depth cutoff, cycle on the current branch, filter, already visited.
//! Only a candidate that passes all four is fetched from the source and
//! recorded. The walk uses an explicit stack so deep registries cannot
//! overflow the call stack; children are pushed in reverse so they are
//! explored left to right, each subtree finishing before its next sibling.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use cratewalk_core::filter::PackageFilter;
use cratewalk_registry::source::DependencySource;

use crate::graph::DependencyGraph;
use crate::visit::VisitedSet;

/// Counts of what a single build call added to the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub recorded: usize,
    pub cycles: usize,
    pub failures: usize,
}

/// One link of the ancestor chain from a candidate back up to the build root.
/// Siblings share their parent's link, so each branch sees only its own ancestors.
struct Ancestor {
    package: String,
    parent: Option<Rc<Ancestor>>,
}

impl Drop for Ancestor {
    // Unlink iteratively so a long chain does not recurse on drop.
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(link) = next {
            match Rc::try_unwrap(link) {
                Ok(mut ancestor) => next = ancestor.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// One pending candidate on the walk stack.
struct Frame {
    package: String,
    depth: usize,
    parent: Option<Rc<Ancestor>>,
}

impl Frame {
    /// The ancestors from the build root down to `package`'s first occurrence,
    /// closed with `package` again, if `package` is already on this branch.
    fn cycle(&self) -> Option<Vec<String>> {
        let mut chain = Vec::new();
        let mut link = self.parent.as_deref();
        while let Some(ancestor) = link {
            chain.push(ancestor.package.clone());
            if ancestor.package == self.package {
                chain.reverse();
                chain.push(self.package.clone());
                return Some(chain);
            }
            link = ancestor.parent.as_deref();
        }
        None
    }
}

/// Builds a [`DependencyGraph`] by querying a [`DependencySource`].
///
/// All traversal state lives here. Successive builds on the same builder share
/// the visited set and accumulate into the same graph.
pub struct GraphBuilder<S> {
    source: S,
    graph: DependencyGraph,
    visited: VisitedSet,
    pinned: HashMap<String, String>,
}

impl<S: DependencySource> GraphBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            graph: DependencyGraph::new(),
            visited: VisitedSet::new(),
            pinned: HashMap::new(),
        }
    }

    /// Ask the source for a specific version of `package` instead of its newest one.
    pub fn pin_version(&mut self, package: &str, version: &str) {
        self.pinned.insert(package.to_string(), version.to_string());
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn into_graph(self) -> DependencyGraph {
        self.graph
    }

    /// Walk the dependencies of `root` down to `max_depth` levels.
    ///
    /// Packages at depth `max_depth` or deeper are dropped, as are packages
    /// matching `filter`. Source failures are recorded and do not stop the walk.
    pub fn build(&mut self, root: &str, max_depth: usize, filter: &PackageFilter) -> BuildStats {
        let before = self.stats();
        let mut stack = vec![Frame {
            package: root.to_string(),
            depth: 0,
            parent: None,
        }];

        while let Some(frame) = stack.pop() {
            let Some(dependencies) = self.visit(&frame, max_depth, filter) else {
                continue;
            };

            let ancestor = Rc::new(Ancestor {
                package: frame.package,
                parent: frame.parent,
            });
            for dep in dependencies.into_iter().rev() {
                stack.push(Frame {
                    package: dep,
                    depth: frame.depth + 1,
                    parent: Some(Rc::clone(&ancestor)),
                });
            }
        }

        let after = self.stats();
        let added = BuildStats {
            recorded: after.recorded - before.recorded,
            cycles: after.cycles - before.cycles,
            failures: after.failures - before.failures,
        };
        tracing::info!(
            root,
            max_depth,
            recorded = added.recorded,
            cycles = added.cycles,
            failures = added.failures,
            "build finished"
        );
        added
    }

    /// Build from `root`, then again from every other package the graph mentions.
    ///
    /// Each identifier recorded so far, as a visited package or as a dependency,
    /// becomes a fresh root with the same depth and filter. Visited packages
    /// return immediately; packages cut off by depth get their own subtree,
    /// which fills in the reverse index.
    ///
    /// The depth bound applies per re-rooted package, so the result can hold
    /// packages further than `max_depth` from `root`.
    pub fn build_complete(
        &mut self,
        root: &str,
        max_depth: usize,
        filter: &PackageFilter,
    ) -> BuildStats {
        let mut total = self.build(root, max_depth, filter);

        let roots = {
            let mut seen = HashSet::new();
            let mut roots = Vec::new();
            for (package, deps) in self.graph.packages() {
                for id in std::iter::once(package).chain(deps.iter().map(String::as_str)) {
                    if id != root && seen.insert(id) {
                        roots.push(id.to_string());
                    }
                }
            }
            roots
        };

        for extra in &roots {
            total = total + self.build(extra, max_depth, filter);
        }
        total
    }

    /// Build from each root in turn, sharing memoization across them.
    pub fn build_from_roots<I, R>(
        &mut self,
        roots: I,
        max_depth: usize,
        filter: &PackageFilter,
    ) -> BuildStats
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        roots.into_iter().fold(BuildStats::default(), |total, root| {
            total + self.build(root.as_ref(), max_depth, filter)
        })
    }

    /// Topological installation order for `package`. See
    /// [`DependencyGraph::installation_order`].
    pub fn installation_order(&self, package: &str) -> Vec<String> {
        self.graph.installation_order(package)
    }

    pub fn reverse_dependencies_of(&self, package: &str) -> &[String] {
        self.graph.reverse_dependencies_of(package)
    }

    /// Apply the traversal rules to one candidate. Returns the dependencies to
    /// descend into when the candidate was visited successfully.
    fn visit(
        &mut self,
        frame: &Frame,
        max_depth: usize,
        filter: &PackageFilter,
    ) -> Option<Vec<String>> {
        let package = frame.package.as_str();

        if frame.depth >= max_depth {
            tracing::trace!(package, depth = frame.depth, "depth cutoff");
            return None;
        }

        if let Some(cycle) = frame.cycle() {
            tracing::debug!(cycle = %cycle.join(" -> "), "cycle detected");
            self.graph.record_cycle(cycle);
            return None;
        }

        if filter.excludes(package) {
            tracing::trace!(package, "excluded by filter");
            return None;
        }

        if !self.visited.visit(package) {
            tracing::trace!(package, "already visited");
            return None;
        }

        let version = self.pinned.get(package).map(String::as_str);
        tracing::debug!(package, depth = frame.depth, ?version, "fetching dependencies");
        match self.source.direct_dependencies(package, version) {
            Ok(dependencies) => {
                self.graph.record(package, dependencies.clone());
                Some(dependencies)
            }
            Err(err) => {
                tracing::warn!(package, error = %err, "failed to fetch dependencies");
                self.graph.record(package, Vec::new());
                self.graph.record_failure(package, err.to_string());
                None
            }
        }
    }

    fn stats(&self) -> BuildStats {
        BuildStats {
            recorded: self.graph.len(),
            cycles: self.graph.cycles().len(),
            failures: self.graph.failures().len(),
        }
    }
}

impl std::ops::Add for BuildStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            recorded: self.recorded + rhs.recorded,
            cycles: self.cycles + rhs.cycles,
            failures: self.failures + rhs.failures,
        }
    }
}
