//! Compose assembly, env templates and scaffold rendering for dockyard.
//!
//! # Pipeline
//!
//! ```text
//! dockyard init
//!   1. Config      ── dockyard.toml + DOCKER_* overrides (dockyard-core)
//!   2. Compose     ── DevComposeAssembler / ProdComposeAssembler → ComposeDocument
//!   3. Templates   ── DockerfileGenerator, EnvGenerator::prod_template
//!   4. Scaffold    ── ScaffoldPlan::write (skips existing files unless forced)
//!   5. Env patch   ── EnvGenerator::dev_values → patch_env_file (optional)
//! ```
//!
//! # Service tables
//!
//! Both assemblers describe their stack as a [`ServiceTable`]: one row per
//! service with its inclusion flag and candidate dependencies. A service only
//! depends on candidates that are themselves included, so a generated graph
//! never references a missing service.

pub mod compose;
pub mod dockerfile;
pub mod env;
pub mod env_patch;
pub mod paths;
pub mod scaffold;

pub use compose::{
    ComposeDocument, DatabaseServiceFactory, DevComposeAssembler, ProdComposeAssembler,
    RenderError, ServiceDefinition, ServiceGraph, ServiceTable,
};
pub use dockerfile::DockerfileGenerator;
pub use env::{EnvGenerator, format_env_line};
pub use env_patch::{EnvPatchError, PatchOutcome, patch_env, patch_env_file};
pub use scaffold::{ScaffoldError, ScaffoldFile, ScaffoldPlan, WriteReport};
