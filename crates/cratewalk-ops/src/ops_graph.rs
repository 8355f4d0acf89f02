//! Operation: build a package's dependency graph and print the requested views.

use std::path::PathBuf;

use cratewalk_core::config::GlobalConfig;
use cratewalk_core::options::{OutputFormat, WalkOptions};
use cratewalk_registry::crates_io::RegistrySource;
use cratewalk_registry::fixture::FixtureSource;
use cratewalk_registry::source::DependencySource;
use cratewalk_resolver::builder::GraphBuilder;
use cratewalk_resolver::graph::DependencyGraph;
use cratewalk_util::progress;

use crate::report;

/// Build the graph for `opts` and print the report on stdout.
pub fn graph(opts: &WalkOptions, config: &GlobalConfig) -> miette::Result<()> {
    let graph = if opts.test_mode {
        let source = FixtureSource::new(PathBuf::from(&opts.repository));
        progress::status_info(
            "Offline",
            &format!("using fixtures in {}", source.dir().display()),
        );
        analyze(source, opts)
    } else {
        let source = RegistrySource::new(&opts.repository, &config.registry)?;
        let spinner = progress::spinner(&format!(
            "Resolving {} from {}",
            opts.package,
            source.base_url()
        ));
        let graph = analyze(source, opts);
        spinner.finish_and_clear();
        graph
    };

    for failure in graph.failures() {
        progress::status_warn("Failed", &failure.to_string());
    }
    if opts.format == OutputFormat::Dot {
        for cycle in graph.cycles() {
            progress::status_warn("Cycle", &cycle.to_string());
        }
    }
    progress::status(
        "Finished",
        &format!(
            "{} packages, {} cycles, {} failures",
            graph.len(),
            graph.cycles().len(),
            graph.failures().len()
        ),
    );

    print!("{}", report::render(opts, &graph));
    Ok(())
}

/// Run the builds `opts` asks for against `source` and return the resulting graph.
///
/// Reverse-dependency mode builds the complete graph from the target and then
/// from every seed; in test mode the fixture catalogue is added to the seeds,
/// since dependents can only be discovered by walking from them.
pub fn analyze<S: DependencySource>(source: S, opts: &WalkOptions) -> DependencyGraph {
    let mut builder = GraphBuilder::new(source);
    if let Some(ref version) = opts.version {
        builder.pin_version(&opts.package, version);
    }

    if opts.reverse_deps {
        builder.build_complete(&opts.package, opts.max_depth, &opts.filter);

        let mut seeds = opts.seeds.clone();
        if opts.test_mode {
            for root in FixtureSource::catalogue() {
                if !seeds.contains(&root) {
                    seeds.push(root);
                }
            }
        }
        tracing::debug!(?seeds, "building from seeds for reverse lookup");
        builder.build_from_roots(&seeds, opts.max_depth, &opts.filter);
    } else {
        builder.build(&opts.package, opts.max_depth, &opts.filter);
    }

    builder.into_graph()
}
