//! Operation: write the built-in example graph out as fixture files.

use std::path::Path;

use cratewalk_registry::fixture::FixtureSource;
use cratewalk_util::progress;

/// Materialise every built-in fixture into `dir`.
pub fn fixtures(dir: &Path, overwrite: bool) -> miette::Result<()> {
    let source = FixtureSource::new(dir);
    let written = source.materialize_builtin(overwrite)?;

    for path in &written {
        progress::status("Created", &path.display().to_string());
    }
    if written.is_empty() {
        progress::status_info(
            "Fresh",
            &format!("all fixtures already present in {}", dir.display()),
        );
    }
    Ok(())
}
