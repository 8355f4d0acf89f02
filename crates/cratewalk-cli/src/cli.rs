//! CLI argument definitions for cratewalk.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cratewalk_core::options::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "cratewalk",
    version,
    about = "Explore the transitive dependency graph of a crate",
    long_about = "cratewalk walks a crate's dependencies through a crates.io-compatible registry \
                  (or offline JSON fixtures) and reports the dependency graph, detected cycles, \
                  reverse dependencies and an installation order."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (defaults to ~/.cratewalk/config.toml)
    #[arg(long, global = true, env = "CRATEWALK_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and display the dependency graph of a package
    Graph {
        /// Name of the package to analyse
        #[arg(short, long)]
        package: String,
        /// Registry API URL, or the fixture directory with --test-mode
        #[arg(short, long)]
        repository: Option<String>,
        /// Exact version of the package to analyse
        #[arg(long = "version", value_name = "VERSION")]
        package_version: Option<String>,
        /// Maximum dependency depth to walk [default: 10]
        #[arg(short = 'd', long, allow_negative_numbers = true)]
        max_depth: Option<i64>,
        /// Skip packages whose name contains this substring
        #[arg(short, long)]
        filter_substring: Option<String>,
        /// Read dependencies from local JSON fixtures instead of the registry
        #[arg(long)]
        test_mode: bool,
        /// Show packages that depend on the target package
        #[arg(long)]
        reverse_deps: bool,
        /// Show the order in which dependencies would be installed
        #[arg(long)]
        installation_order: bool,
        /// Extra root packages to walk when looking up reverse dependencies
        #[arg(long = "seed", value_name = "PACKAGE")]
        seeds: Vec<String>,
        /// Graph output format: list, tree, dot
        #[arg(long, default_value = "list")]
        format: OutputFormat,
    },

    /// Write the built-in example fixtures to a directory
    Fixtures {
        /// Target directory
        #[arg(default_value = "fixtures")]
        dir: PathBuf,
        /// Overwrite fixtures that already exist
        #[arg(long)]
        force: bool,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
