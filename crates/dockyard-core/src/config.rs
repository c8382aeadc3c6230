use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::DatabaseDriver;
use crate::overrides::{self, EnvLookup};
use crate::selections::{DevSelections, ProdSelections};

/// Name of the configuration file looked up in the project directory.
pub const CONFIG_FILE: &str = "dockyard.toml";

/// Project name used when neither the config nor `.env` provides one.
pub const DEFAULT_PROJECT_NAME: &str = "laravel";

/// Image used when a driver has no entry in `[database_images]`.
pub const FALLBACK_DATABASE_IMAGE: &str = "mariadb:latest";

/// dockyard.toml, fully resolved: shared config plus per-environment selections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DockyardConfig {
    #[serde(flatten)]
    pub config: Config,
    #[serde(default)]
    pub dev: DevSelections,
    #[serde(default)]
    pub prod: ProdSelections,
}

/// Settings shared by the dev and prod scaffolds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub versions: VersionsConfig,
    #[serde(default)]
    pub ports: PortsConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Container image per database driver.
    #[serde(default = "default_database_images")]
    pub database_images: IndexMap<DatabaseDriver, String>,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub traefik: TraefikConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (defaults to `APP_NAME` from `.env`, lowercased without spaces)
    pub name: Option<String>,
    /// Application name written to `.env.production`
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Internal docker network
    #[serde(default = "default_network")]
    pub network: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionsConfig {
    #[serde(default = "default_php_version")]
    pub php: String,
    #[serde(default = "default_node_version")]
    pub node: String,
}

/// Host ports published by the development stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortsConfig {
    #[serde(default = "default_frontend_port")]
    pub frontend: u16,
    #[serde(default = "default_vite_port")]
    pub vite: u16,
    #[serde(default = "default_database_port")]
    pub database: u16,
    #[serde(default = "default_redis_port")]
    pub redis: u16,
    #[serde(default = "default_mailhog_smtp_port")]
    pub mailhog_smtp: u16,
    #[serde(default = "default_mailhog_web_port")]
    pub mailhog_web: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default = "default_db_password")]
    pub password: String,
}

/// Container registry the production stack pulls from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_url")]
    pub url: String,
    #[serde(default = "default_backend_image")]
    pub backend_image: String,
    #[serde(default = "default_frontend_image")]
    pub frontend_image: String,
}

/// Traefik reverse proxy in front of the production frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraefikConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Externally managed network traefik listens on
    #[serde(default = "default_traefik_network")]
    pub network: String,
    #[serde(default = "default_certresolver")]
    pub certresolver: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            versions: VersionsConfig::default(),
            ports: PortsConfig::default(),
            database: DatabaseConfig::default(),
            database_images: default_database_images(),
            registry: RegistryConfig::default(),
            traefik: TraefikConfig::default(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            app_name: default_app_name(),
            network: default_network(),
        }
    }
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            php: default_php_version(),
            node: default_node_version(),
        }
    }
}

impl Default for PortsConfig {
    fn default() -> Self {
        Self {
            frontend: default_frontend_port(),
            vite: default_vite_port(),
            database: default_database_port(),
            redis: default_redis_port(),
            mailhog_smtp: default_mailhog_smtp_port(),
            mailhog_web: default_mailhog_web_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: default_db_name(),
            user: default_db_user(),
            password: default_db_password(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
            backend_image: default_backend_image(),
            frontend_image: default_frontend_image(),
        }
    }
}

impl Default for TraefikConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            domain: default_domain(),
            network: default_traefik_network(),
            certresolver: default_certresolver(),
        }
    }
}

impl Config {
    pub fn project_name(&self) -> &str {
        match self.project.name.as_deref() {
            Some(name) => name,
            None => DEFAULT_PROJECT_NAME,
        }
    }

    /// Image for `driver`, falling back to [`FALLBACK_DATABASE_IMAGE`].
    pub fn database_image(&self, driver: DatabaseDriver) -> &str {
        match self.database_images.get(&driver) {
            Some(image) => image,
            None => {
                tracing::warn!(
                    driver = %driver,
                    fallback = FALLBACK_DATABASE_IMAGE,
                    "no image configured for database driver; using fallback"
                );
                FALLBACK_DATABASE_IMAGE
            }
        }
    }

    /// `{registry}/{image}:latest` reference for a pre-built production image.
    pub fn registry_image(&self, image: &str) -> String {
        format!("{}/{}:latest", self.registry.url, image)
    }

    pub fn backend_image_ref(&self) -> String {
        self.registry_image(&self.registry.backend_image)
    }

    pub fn frontend_image_ref(&self) -> String {
        self.registry_image(&self.registry.frontend_image)
    }
}

impl DockyardConfig {
    /// Load `dockyard.toml` and `.env` overrides from `project_dir`,
    /// reading `DOCKER_*` variables from the process environment.
    pub fn load(project_dir: &Path) -> crate::Result<Self> {
        Self::load_with(project_dir, &|key: &str| {
            std::env::var(key)
                // arch-lint: allow(no-silent-result-drop) reason="an unset or non-UTF-8 variable means no override"
                .ok()
        })
    }

    /// Like [`load`](Self::load) but with an explicit environment lookup.
    ///
    /// Lookup order for each override: `process_env`, then the project's `.env`.
    /// A missing config file yields defaults; a missing `.env` contributes nothing.
    pub fn load_with(project_dir: &Path, process_env: &EnvLookup<'_>) -> crate::Result<Self> {
        let mut loaded = Self::load_file(project_dir)?;

        let dotenv = overrides::read_env_file(&project_dir.join(".env"))?;
        let lookup = |key: &str| process_env(key).or_else(|| dotenv.get(key).cloned());

        if loaded.config.project.name.is_none() {
            loaded.config.project.name = dotenv
                .get("APP_NAME")
                .map(|app| overrides::project_slug(app))
                .filter(|slug| !slug.is_empty());
        }

        overrides::apply(&mut loaded.config, &lookup)?;
        loaded.validate()?;

        tracing::debug!(
            project = %loaded.config.project_name(),
            dev_driver = %loaded.dev.database.driver,
            prod_driver = %loaded.prod.database.driver,
            "configuration loaded"
        );

        Ok(loaded)
    }

    fn load_file(project_dir: &Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            tracing::debug!(path = %config_path.display(), "no config file; using defaults");
            Ok(Self::default())
        }
    }

    /// Reject selections the scaffold cannot express.
    pub fn validate(&self) -> crate::Result<()> {
        let driver = self.prod.database.driver;
        if !driver.allowed_in_production() {
            return Err(crate::Error::UnsupportedProductionDriver(driver));
        }
        Ok(())
    }
}

fn default_database_images() -> IndexMap<DatabaseDriver, String> {
    IndexMap::from([
        (DatabaseDriver::Mariadb, "mariadb:latest".to_owned()),
        (DatabaseDriver::Mysql, "mysql:8".to_owned()),
        (DatabaseDriver::Postgresql, "postgres:16-alpine".to_owned()),
    ])
}

fn default_true() -> bool {
    true
}

fn default_app_name() -> String {
    "Laravel".to_owned()
}

fn default_network() -> String {
    "app-network".to_owned()
}

fn default_php_version() -> String {
    "8.2".to_owned()
}

fn default_node_version() -> String {
    "22".to_owned()
}

fn default_frontend_port() -> u16 {
    8080
}

fn default_vite_port() -> u16 {
    5173
}

fn default_database_port() -> u16 {
    33066
}

fn default_redis_port() -> u16 {
    63799
}

fn default_mailhog_smtp_port() -> u16 {
    1025
}

fn default_mailhog_web_port() -> u16 {
    8025
}

fn default_db_name() -> String {
    "laravel".to_owned()
}

fn default_db_user() -> String {
    "root".to_owned()
}

fn default_db_password() -> String {
    "password".to_owned()
}

fn default_registry_url() -> String {
    "registry.digitalocean.com/myregistry".to_owned()
}

fn default_backend_image() -> String {
    "backend".to_owned()
}

fn default_frontend_image() -> String {
    "frontend".to_owned()
}

fn default_domain() -> String {
    "example.com".to_owned()
}

fn default_traefik_network() -> String {
    "traefik-public".to_owned()
}

fn default_certresolver() -> String {
    "le".to_owned()
}
