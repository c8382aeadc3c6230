//! Core types and configuration for dockyard.
//!
//! This crate defines the `dockyard.toml` schema ([`DockyardConfig`]),
//! the per-environment [`DevSelections`] / [`ProdSelections`], the
//! [`DatabaseDriver`] lookup table, and shared error types.

pub mod config;
pub mod driver;
pub mod error;
pub mod overrides;
pub mod selections;

pub use config::{
    CONFIG_FILE, Config, DatabaseConfig, DockyardConfig, PortsConfig, ProjectConfig,
    RegistryConfig, TraefikConfig, VersionsConfig,
};
pub use driver::{ContainerEnvStyle, DatabaseDriver, DriverProfile};
pub use error::{Error, Result};
pub use selections::{DatabaseSelection, DevSelections, Environment, ProdSelections};
