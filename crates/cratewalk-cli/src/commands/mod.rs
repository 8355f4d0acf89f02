//! Command dispatch and handler modules.

mod fixtures;
mod graph;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Graph {
            package,
            repository,
            package_version,
            max_depth,
            filter_substring,
            test_mode,
            reverse_deps,
            installation_order,
            seeds,
            format,
        } => graph::exec(
            cli.config.as_deref(),
            cratewalk_core::options::WalkRequest {
                package,
                repository,
                version: package_version,
                max_depth,
                filter: filter_substring,
                reverse_deps,
                installation_order,
                test_mode,
                seeds,
                format,
            },
        ),
        Command::Fixtures { dir, force } => fixtures::exec(&dir, force),
    }
}
