//! Plain-text rendering of a built graph.
//!
//! Every function returns a `String` so the operations layer decides where it
//! goes and tests can inspect it.

use std::fmt::Write;

use cratewalk_core::filter::PackageFilter;
use cratewalk_core::options::{OutputFormat, WalkOptions};
use cratewalk_resolver::graph::DependencyGraph;

/// The full report for a walk, in the order the sections are printed.
pub fn render(opts: &WalkOptions, graph: &DependencyGraph) -> String {
    if opts.format == OutputFormat::Dot {
        return graph.to_dot(&opts.filter);
    }

    let mut out = String::new();
    let _ = writeln!(out, "=== Dependency graph (depth: {}) ===", opts.max_depth);
    match opts.format {
        OutputFormat::Tree => out.push_str(&tree_section(graph, &opts.package, &opts.filter)),
        OutputFormat::List | OutputFormat::Dot => {
            out.push_str(&list_section(graph, &opts.filter));
        }
    }
    out.push('\n');
    out.push_str(&cycles_section(graph));
    out.push_str(&failures_section(graph));

    if opts.reverse_deps {
        out.push('\n');
        out.push_str(&reverse_section(graph, &opts.package, opts.test_mode));
    }
    if opts.installation_order {
        out.push('\n');
        out.push_str(&installation_section(graph, &opts.package, opts.test_mode));
    }
    out
}

/// `package -> [deps]` per visited package, hiding filtered dependency names.
pub fn list_section(graph: &DependencyGraph, filter: &PackageFilter) -> String {
    if graph.is_empty() {
        return "Graph is empty\n".to_string();
    }
    let mut out = String::new();
    for (package, deps) in graph.packages() {
        let shown: Vec<&str> = deps
            .iter()
            .map(String::as_str)
            .filter(|d| !filter.excludes(d))
            .collect();
        let _ = writeln!(out, "{package} -> [{}]", shown.join(", "));
    }
    out
}

fn tree_section(graph: &DependencyGraph, root: &str, filter: &PackageFilter) -> String {
    let tree = graph.print_tree(root, filter);
    if tree.is_empty() {
        "Graph is empty\n".to_string()
    } else {
        tree
    }
}

/// Detected cycles followed by the processed-package count.
pub fn cycles_section(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    if graph.cycles().is_empty() {
        out.push_str("No cyclic dependencies detected\n");
    } else {
        out.push_str("Cyclic dependencies detected:\n");
        for cycle in graph.cycles() {
            let _ = writeln!(out, "Cycle: {cycle}");
        }
    }
    let _ = writeln!(out, "Processed packages: {}", graph.len());
    out
}

/// Packages whose dependency list could not be fetched; empty when there are none.
pub fn failures_section(graph: &DependencyGraph) -> String {
    let mut out = String::new();
    if graph.failures().is_empty() {
        return out;
    }
    let _ = writeln!(
        out,
        "\nResolution failures ({}), recorded with no dependencies:",
        graph.failures().len()
    );
    for failure in graph.failures() {
        let _ = writeln!(out, "  - {failure}");
    }
    out
}

pub fn reverse_section(graph: &DependencyGraph, package: &str, test_mode: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Reverse dependencies of {package} ===");
    let dependents = graph.reverse_dependencies_of(package);
    if dependents.is_empty() {
        out.push_str("No reverse dependencies found\n");
        if test_mode {
            out.push_str("In the test data, check the dependencies of packages A, B, C and E\n");
        }
        return out;
    }
    let _ = writeln!(out, "Packages depending on {package}:");
    for dependent in dependents {
        let _ = writeln!(out, "  - {dependent}");
    }
    let _ = writeln!(out, "Total reverse dependencies: {}", dependents.len());
    out
}

pub fn installation_section(graph: &DependencyGraph, package: &str, test_mode: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Installation order for {package} ===");
    let order = graph.installation_order(package);
    if order.is_empty() {
        out.push_str("Could not determine an installation order\n");
    } else {
        for (i, pkg) in order.iter().enumerate() {
            let _ = writeln!(out, "{:2}. {pkg}", i + 1);
        }
    }
    let cycle_in_order = graph
        .cycles()
        .iter()
        .any(|cycle| cycle.packages().iter().any(|p| order.contains(p)));
    if cycle_in_order {
        out.push_str("Note: the graph contains cycles; order inside a cycle is best effort\n");
    }

    out.push_str("\nComparison with Cargo:\n");
    if test_mode {
        out.push_str("In test mode:\n");
        out.push_str("  - The order comes from a topological sort of the fixture graph\n");
        out.push_str("  - Cargo resolves dependencies with a more involved algorithm\n");
        out.push_str("  - Feature flags and version requirements are taken into account by Cargo\n");
    } else {
        out.push_str("Possible reasons for differences:\n");
        out.push_str("  1. Cargo performs semantic version resolution\n");
        out.push_str("  2. Optional dependencies (features)\n");
        out.push_str("  3. Different version conflict resolution\n");
        out.push_str("  4. Local cache and already installed packages\n");
        out.push_str("\nFor an exact comparison:\n");
        let _ = writeln!(out, "  cargo tree --package {package} --invert");
    }
    out
}
