//! Handler for `cratewalk fixtures`.

use std::path::Path;

use miette::Result;

use cratewalk_ops::ops_fixtures;

pub fn exec(dir: &Path, force: bool) -> Result<()> {
    ops_fixtures::fixtures(dir, force)
}
