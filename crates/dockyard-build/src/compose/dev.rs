use dockyard_core::{Config, DevSelections, Environment};
use indexmap::IndexMap;

use super::database::DatabaseServiceFactory;
use super::model::{ComposeDocument, NetworkDefinition, RestartMode, ServiceDefinition};
use super::table::ServiceTable;
use crate::paths;

const APP_MOUNT: &str = "./:/var/www";
const NODE_COMMAND: &str = r#"sh -c "npm install && npm run dev -- --host 0.0.0.0""#;

/// Assembles the development compose document.
///
/// Emission order: `backend`, `frontend`, `[database]`, `[redis]`, `node`,
/// `[horizon]`, `[scheduler]`, `[mailhog]`. Everything joins one bridge network.
pub struct DevComposeAssembler<'a> {
    config: &'a Config,
    selections: &'a DevSelections,
}

impl<'a> DevComposeAssembler<'a> {
    pub fn new(config: &'a Config, selections: &'a DevSelections) -> Self {
        Self { config, selections }
    }

    pub fn table(&self) -> ServiceTable<'a> {
        let config = self.config;
        let sel = self.selections;
        let database = sel.database.container_driver();

        ServiceTable::new()
            .row("backend", true, &[], move || {
                let mut svc = app_service(config, paths::DEV_BACKEND_DOCKERFILE);
                svc.tty = true;
                svc
            })
            .row("frontend", true, &[], move || {
                let mut svc = app_service(config, paths::DEV_FRONTEND_DOCKERFILE);
                svc.tty = true;
                svc.ports = vec![format!("{}:80", config.ports.frontend)];
                svc
            })
            .row("database", database.is_some(), &[], move || {
                DatabaseServiceFactory::new(config).build(sel.database.driver, Environment::Dev)
            })
            .row("redis", sel.redis, &[], move || {
                let mut svc = ServiceDefinition::image("redis:alpine");
                svc.restart = Some(RestartMode::UnlessStopped);
                svc.ports = vec![format!("{}:6379", config.ports.redis)];
                svc.networks = vec![config.project.network.clone()];
                svc
            })
            .row("node", true, &[], move || {
                let mut svc = ServiceDefinition::build(paths::DEV_NODE_DOCKERFILE);
                svc.command = Some(NODE_COMMAND.to_owned());
                svc.tty = true;
                svc.volumes = vec![APP_MOUNT.to_owned()];
                svc.ports = vec![format!("{}:5173", config.ports.vite)];
                svc.networks = vec![config.project.network.clone()];
                svc
            })
            .row("horizon", sel.horizon, &["redis", "database"], move || {
                let mut svc = app_service(config, paths::DEV_BACKEND_DOCKERFILE);
                svc.command = Some("php artisan horizon".to_owned());
                svc
            })
            .row("scheduler", sel.scheduler, &["database"], move || {
                let mut svc = app_service(config, paths::DEV_BACKEND_DOCKERFILE);
                svc.command = Some("php artisan schedule:work".to_owned());
                svc
            })
            .row("mailhog", sel.mailhog, &[], move || {
                let mut svc = ServiceDefinition::image("mailhog/mailhog");
                svc.restart = Some(RestartMode::UnlessStopped);
                svc.ports = vec![
                    format!("{}:1025", config.ports.mailhog_smtp),
                    format!("{}:8025", config.ports.mailhog_web),
                ];
                svc.networks = vec![config.project.network.clone()];
                svc
            })
    }

    pub fn assemble(&self) -> ComposeDocument {
        let services = self.table().assemble();
        tracing::debug!(services = ?services.names(), "assembled dev compose");

        ComposeDocument {
            services,
            networks: IndexMap::from([(
                self.config.project.network.clone(),
                NetworkDefinition::bridge(),
            )]),
            volumes: None,
        }
    }
}

/// Locally built service with the project mounted at `/var/www`.
fn app_service(config: &Config, dockerfile: &str) -> ServiceDefinition {
    let mut svc = ServiceDefinition::build(dockerfile);
    svc.restart = Some(RestartMode::UnlessStopped);
    svc.volumes = vec![APP_MOUNT.to_owned()];
    svc.networks = vec![config.project.network.clone()];
    svc
}
