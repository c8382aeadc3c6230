mod compose;
mod env;
mod init;

use std::path::PathBuf;

use dockyard_core::DockyardConfig;

pub use compose::compose;
pub use env::env;
pub use init::{InitOptions, init};

/// Commands operate on the project in the current directory.
fn load_config() -> anyhow::Result<(PathBuf, DockyardConfig)> {
    let project_dir = PathBuf::from(".");
    let config = DockyardConfig::load(&project_dir)?;
    Ok((project_dir, config))
}
