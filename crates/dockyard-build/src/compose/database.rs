use dockyard_core::{Config, ContainerEnvStyle, DatabaseDriver, Environment};
use indexmap::IndexMap;

use super::model::{RestartMode, ServiceDefinition};

/// Builds the database container for either environment.
///
/// Callers pass a driver that runs a container (`mariadb`, `mysql`,
/// `postgresql`). Anything else is treated as the MySQL family, and a driver
/// without an image entry gets the fallback image; this factory never fails.
pub struct DatabaseServiceFactory<'a> {
    config: &'a Config,
}

impl<'a> DatabaseServiceFactory<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn build(&self, driver: DatabaseDriver, environment: Environment) -> ServiceDefinition {
        let family = container_family(driver);
        let profile = family.profile();
        let (data_dir, container_port) = match (profile.data_dir, profile.port) {
            (Some(data_dir), Some(port)) => (data_dir, port),
            _ => ("/var/lib/mysql", 3306),
        };
        let db = &self.config.database;

        let mut service = ServiceDefinition::image(self.config.database_image(driver));
        service.restart = Some(RestartMode::UnlessStopped);
        service.networks = vec![self.config.project.network.clone()];
        service.environment = match profile.env_style {
            Some(ContainerEnvStyle::Postgres) => IndexMap::from([
                ("POSTGRES_DB".to_owned(), db.name.clone()),
                ("POSTGRES_USER".to_owned(), db.user.clone()),
                ("POSTGRES_PASSWORD".to_owned(), db.password.clone()),
            ]),
            _ => {
                if environment == Environment::Prod {
                    service.container_name = Some(format!("{}_db", self.config.project_name()));
                }
                IndexMap::from([
                    ("MYSQL_ROOT_PASSWORD".to_owned(), db.password.clone()),
                    ("MYSQL_DATABASE".to_owned(), db.name.clone()),
                    ("MYSQL_USER".to_owned(), db.user.clone()),
                    ("MYSQL_PASSWORD".to_owned(), db.password.clone()),
                ])
            }
        };

        let source = match environment {
            Environment::Dev => "./.dbdata".to_owned(),
            Environment::Prod => volume_name(driver).to_owned(),
        };
        service.volumes = vec![format!("{source}:{data_dir}")];
        service.ports = vec![format!("{}:{container_port}", self.config.ports.database)];

        tracing::debug!(%driver, %environment, "built database service");
        service
    }
}

/// Named production volume for `driver`; must be declared in the document's
/// top-level `volumes` whenever the database service is present.
pub fn volume_name(driver: DatabaseDriver) -> &'static str {
    match container_family(driver).profile().volume_name {
        Some(name) => name,
        None => "mariadb_data",
    }
}

fn container_family(driver: DatabaseDriver) -> DatabaseDriver {
    if driver.has_container() {
        driver
    } else {
        DatabaseDriver::Mariadb
    }
}
