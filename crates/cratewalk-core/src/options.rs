//! Per-invocation walk options and their validation.

use std::fmt;
use std::str::FromStr;

use cratewalk_util::errors::CratewalkError;

use crate::config::GlobalConfig;
use crate::filter::PackageFilter;

/// How the forward graph is rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `package -> [deps]` lines in visitation order.
    #[default]
    List,
    /// Box-drawing tree from the root package.
    Tree,
    /// Graphviz DOT document.
    Dot,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "tree" => Ok(Self::Tree),
            "dot" => Ok(Self::Dot),
            other => Err(format!(
                "unknown output format '{other}' (expected list, tree or dot)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::List => "list",
            Self::Tree => "tree",
            Self::Dot => "dot",
        };
        f.write_str(name)
    }
}

/// Raw, unvalidated walk parameters as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct WalkRequest {
    pub package: String,
    pub repository: Option<String>,
    pub version: Option<String>,
    pub max_depth: Option<i64>,
    pub filter: Option<String>,
    pub reverse_deps: bool,
    pub installation_order: bool,
    pub test_mode: bool,
    pub seeds: Vec<String>,
    pub format: OutputFormat,
}

/// Validated parameters for one graph walk.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    pub package: String,
    /// Registry base URL, or the fixture directory in test mode.
    pub repository: String,
    pub version: Option<String>,
    pub max_depth: usize,
    pub filter: PackageFilter,
    pub reverse_deps: bool,
    pub installation_order: bool,
    pub test_mode: bool,
    /// Extra build roots used to populate the reverse index.
    pub seeds: Vec<String>,
    pub format: OutputFormat,
}

impl WalkRequest {
    /// Check the request and fill unset values from `config`.
    ///
    /// Fails with [`CratewalkError::Config`] on an empty package or repository,
    /// a non-positive depth, or a version that is not valid semver.
    pub fn validate(self, config: &GlobalConfig) -> miette::Result<WalkOptions> {
        let package = self.package.trim().to_string();
        if package.is_empty() {
            return Err(config_error("package name must not be empty"));
        }

        let repository = match self.repository {
            Some(repo) => repo.trim().to_string(),
            None if self.test_mode => config.fixtures.dir.clone(),
            None => config.registry.url.clone(),
        };
        if repository.is_empty() {
            return Err(config_error("repository must not be empty"));
        }

        let depth = self.max_depth.unwrap_or(config.walk.max_depth);
        if depth <= 0 {
            return Err(config_error(&format!(
                "max depth must be a positive integer, got {depth}"
            )));
        }
        let max_depth = usize::try_from(depth)
            .map_err(|_| config_error(&format!("max depth {depth} is out of range")))?;

        let version = match self.version.map(|v| v.trim().to_string()) {
            Some(v) if v.is_empty() => None,
            Some(v) => {
                semver::Version::parse(&v).map_err(|e| {
                    config_error(&format!("'{v}' is not a valid semantic version: {e}"))
                })?;
                Some(v)
            }
            None => None,
        };

        let seeds = self
            .seeds
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let options = WalkOptions {
            package,
            repository,
            version,
            max_depth,
            filter: PackageFilter::new(self.filter.as_deref()),
            reverse_deps: self.reverse_deps,
            installation_order: self.installation_order,
            test_mode: self.test_mode,
            seeds,
            format: self.format,
        };
        tracing::debug!(?options, "validated walk options");
        Ok(options)
    }
}

fn config_error(message: &str) -> miette::Report {
    CratewalkError::Config {
        message: message.to_string(),
    }
    .into()
}
