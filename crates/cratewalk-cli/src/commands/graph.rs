//! Handler for `cratewalk graph`.

use std::path::Path;

use miette::Result;

use cratewalk_core::config::GlobalConfig;
use cratewalk_core::options::WalkRequest;
use cratewalk_ops::ops_graph;

pub fn exec(config_path: Option<&Path>, request: WalkRequest) -> Result<()> {
    let config = match config_path {
        Some(path) => GlobalConfig::load_from(path)?,
        None => GlobalConfig::load()?,
    };
    let opts = request.validate(&config)?;
    ops_graph::graph(&opts, &config)
}
