//! Per-environment service selections.
//!
//! Selections are plain values: the assemblers read them and never mutate
//! them, and they carry no defaults beyond what `dockyard.toml` supplies.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::DatabaseDriver;

/// Which stack a piece of output is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Dev => "dev",
            Environment::Prod => "prod",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSelection {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_driver")]
    pub driver: DatabaseDriver,
}

/// Development stack selections (`[dev]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevSelections {
    #[serde(default)]
    pub database: DatabaseSelection,
    #[serde(default = "default_true")]
    pub redis: bool,
    /// Queue worker
    #[serde(default = "default_true")]
    pub horizon: bool,
    #[serde(default = "default_true")]
    pub scheduler: bool,
    /// Local SMTP catcher
    #[serde(default = "default_true")]
    pub mailhog: bool,
}

/// Production stack selections (`[prod]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProdSelections {
    #[serde(default)]
    pub database: DatabaseSelection,
    #[serde(default = "default_true")]
    pub redis: bool,
    #[serde(default = "default_true")]
    pub horizon: bool,
    #[serde(default = "default_true")]
    pub scheduler: bool,
    /// Run `migrate --force` before the backend starts
    #[serde(default = "default_true")]
    pub migrate: bool,
    /// One-off artisan commands run once per deploy, in order
    #[serde(default)]
    pub deploy_jobs: Vec<String>,
    /// Long-running artisan commands, one worker service each
    #[serde(default)]
    pub deploy_services: Vec<String>,
    /// Bake `.env.production` into the backend image
    #[serde(default = "default_true")]
    pub env_in_image: bool,
}

impl DatabaseSelection {
    pub fn new(enabled: bool, driver: DatabaseDriver) -> Self {
        Self { enabled, driver }
    }

    /// Driver of the database container, if this selection runs one.
    ///
    /// Disabled selections, `sqlite`, and `none` have no container.
    pub fn container_driver(&self) -> Option<DatabaseDriver> {
        (self.enabled && self.driver.has_container()).then_some(self.driver)
    }
}

impl Default for DatabaseSelection {
    fn default() -> Self {
        Self {
            enabled: true,
            driver: default_driver(),
        }
    }
}

impl Default for DevSelections {
    fn default() -> Self {
        Self {
            database: DatabaseSelection::default(),
            redis: true,
            horizon: true,
            scheduler: true,
            mailhog: true,
        }
    }
}

impl Default for ProdSelections {
    fn default() -> Self {
        Self {
            database: DatabaseSelection::default(),
            redis: true,
            horizon: true,
            scheduler: true,
            migrate: true,
            deploy_jobs: Vec::new(),
            deploy_services: Vec::new(),
            env_in_image: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_driver() -> DatabaseDriver {
    DatabaseDriver::Mariadb
}
