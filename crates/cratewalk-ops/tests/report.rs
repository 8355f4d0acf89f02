use cratewalk_core::config::GlobalConfig;
use cratewalk_core::options::{OutputFormat, WalkOptions, WalkRequest};
use cratewalk_ops::ops_graph::analyze;
use cratewalk_ops::report;
use cratewalk_registry::fixture::FixtureSource;
use tempfile::TempDir;

fn options(tmp: &TempDir, package: &str) -> WalkRequest {
    WalkRequest {
        package: package.to_string(),
        repository: Some(tmp.path().display().to_string()),
        test_mode: true,
        ..WalkRequest::default()
    }
}

fn validate(req: WalkRequest) -> WalkOptions {
    req.validate(&GlobalConfig::default()).unwrap()
}

#[test]
fn test_list_report_for_letter_graph() {
    let tmp = TempDir::new().unwrap();
    let opts = validate(options(&tmp, "A"));
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::render(&opts, &graph);

    assert!(out.starts_with("=== Dependency graph (depth: 10) ===\nA -> [B, C]\nB -> [D, E]\n"));
    assert!(out.contains("No cyclic dependencies detected"));
    assert!(out.contains("Processed packages: 6"));
    assert!(!out.contains("Reverse dependencies"));
    assert!(!out.contains("Installation order"));
}

#[test]
fn test_filtered_dependencies_are_hidden_in_list() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "serde_derive");
    req.filter = Some("mac".to_string());
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::render(&opts, &graph);

    assert!(out.contains("serde_derive -> [quote, syn]"));
    assert!(!out.contains("proc-macro2"));
    assert_eq!(graph.dependencies_of("serde_derive").unwrap().len(), 3);
}

#[test]
fn test_cycle_is_reported() {
    let tmp = TempDir::new().unwrap();
    let opts = validate(options(&tmp, "serde"));
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::render(&opts, &graph);
    assert!(out.contains("Cycle: serde -> serde_json -> serde"));
}

#[test]
fn test_reverse_mode_uses_fixture_catalogue() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "F");
    req.reverse_deps = true;
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::render(&opts, &graph);

    assert!(out.contains("=== Reverse dependencies of F ==="));
    assert!(out.contains("  - E\n  - C\n"));
    assert!(out.contains("Total reverse dependencies: 2"));
}

#[test]
fn test_reverse_mode_without_dependents_hints_in_test_mode() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "A");
    req.reverse_deps = true;
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::reverse_section(&graph, "A", true);

    assert!(out.contains("No reverse dependencies found"));
    assert!(out.contains("check the dependencies of packages A, B, C and E"));
}

#[test]
fn test_installation_order_is_numbered() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "A");
    req.installation_order = true;
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::render(&opts, &graph);

    assert!(out.contains(" 1. D\n 2. F\n 3. E\n 4. B\n 5. C\n 6. A\n"));
    assert!(out.contains("Comparison with Cargo:"));
    assert!(out.contains("In test mode:"));
}

#[test]
fn test_live_mode_notes_suggest_cargo_tree() {
    let tmp = TempDir::new().unwrap();
    let opts = validate(options(&tmp, "A"));
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::installation_section(&graph, "A", false);
    assert!(out.contains("cargo tree --package A --invert"));
}

#[test]
fn test_depth_is_respected() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "A");
    req.max_depth = Some(1);
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    assert_eq!(report::list_section(&graph, &opts.filter), "A -> [B, C]\n");
}

#[test]
fn test_tree_format() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "C");
    req.format = OutputFormat::Tree;
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::render(&opts, &graph);
    assert!(out.contains("C\n└── F\n"));
}

#[test]
fn test_dot_format_is_only_the_document() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "C");
    req.format = OutputFormat::Dot;
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::render(&opts, &graph);
    assert!(out.starts_with("digraph {"));
    assert!(!out.contains("Processed packages"));
}

#[test]
fn test_empty_graph_when_root_is_filtered() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "A");
    req.filter = Some("A".to_string());
    req.installation_order = true;
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);
    let out = report::render(&opts, &graph);
    assert!(out.contains("Graph is empty"));
    assert!(out.contains("Could not determine an installation order"));
}

#[test]
fn test_cycle_note_only_for_cycles_in_the_ordered_subgraph() {
    let tmp = TempDir::new().unwrap();
    let mut req = options(&tmp, "A");
    req.reverse_deps = true;
    req.installation_order = true;
    let opts = validate(req);
    let graph = analyze(FixtureSource::new(tmp.path()), &opts);

    // The catalogue seeds pull in serde, whose cycle does not touch A.
    assert!(!graph.cycles().is_empty());
    let out = report::installation_section(&graph, "A", true);
    assert!(!out.contains("the graph contains cycles"));

    let out = report::installation_section(&graph, "serde", true);
    assert!(out.contains("the graph contains cycles"));
}
