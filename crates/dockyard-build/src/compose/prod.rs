use dockyard_core::{Config, Environment, ProdSelections};
use indexmap::IndexMap;

use super::database::{DatabaseServiceFactory, volume_name};
use super::model::{
    ComposeDocument, DeployPolicy, NetworkDefinition, RestartCondition, RestartMode,
    RestartPolicy, ServiceDefinition, VolumeDefinition,
};
use super::table::ServiceTable;

const RESTART_DELAY: &str = "5s";
const MAX_ATTEMPTS: u32 = 3;

/// Assembles the production compose document.
///
/// Production never builds from source: every application service pulls
/// `{registry}/{image}:latest`. Emission order: `[migrate]`, `[deploy-jobs]`,
/// `backend`, `frontend`, `[redis]`, `[database]`, `[horizon]`, `[scheduler]`,
/// `worker-1..worker-N`.
pub struct ProdComposeAssembler<'a> {
    config: &'a Config,
    selections: &'a ProdSelections,
}

impl<'a> ProdComposeAssembler<'a> {
    pub fn new(config: &'a Config, selections: &'a ProdSelections) -> Self {
        Self { config, selections }
    }

    pub fn table(&self) -> ServiceTable<'a> {
        let config = self.config;
        let sel = self.selections;
        let database = sel.database.container_driver();
        let network = config.project.network.as_str();
        let traefik = &config.traefik;

        let mut table = ServiceTable::new()
            .row("migrate", sel.migrate, &["database"], move || {
                let mut svc = ServiceDefinition::image(config.backend_image_ref());
                svc.command = Some(artisan("migrate --force"));
                svc.networks = vec![network.to_owned()];
                svc.deploy = Some(DeployPolicy {
                    replicas: 1,
                    restart_policy: RestartPolicy {
                        condition: RestartCondition::OnFailure,
                        delay: None,
                        max_attempts: Some(MAX_ATTEMPTS),
                    },
                    labels: Vec::new(),
                });
                svc
            })
            .row(
                "deploy-jobs",
                !sel.deploy_jobs.is_empty(),
                &["migrate"],
                move || {
                    let mut svc = ServiceDefinition::image(config.backend_image_ref());
                    svc.command = Some(chain_jobs(&sel.deploy_jobs));
                    svc.networks = vec![network.to_owned()];
                    svc.deploy = Some(DeployPolicy {
                        replicas: 1,
                        restart_policy: RestartPolicy {
                            condition: RestartCondition::None,
                            delay: None,
                            max_attempts: None,
                        },
                        labels: Vec::new(),
                    });
                    svc
                },
            )
            .row("backend", true, &["migrate"], move || {
                let mut svc = long_running(config.backend_image_ref(), network, None);
                svc.tty = true;
                svc.environment =
                    IndexMap::from([("ASSET_URL".to_owned(), format!("https://{}", traefik.domain))]);
                svc
            })
            .row("frontend", true, &["backend"], move || {
                let mut svc = long_running(config.frontend_image_ref(), network, None);
                svc.tty = true;
                svc.ports = vec![format!("{}:80", config.ports.frontend)];
                if traefik.enabled {
                    svc.networks.push(traefik.network.clone());
                    if let Some(deploy) = svc.deploy.as_mut() {
                        deploy.labels = routing_labels(config);
                    }
                }
                svc
            })
            .row("redis", sel.redis, &[], move || {
                let mut svc = ServiceDefinition::image("redis:alpine");
                svc.restart = Some(RestartMode::UnlessStopped);
                svc.networks = vec![network.to_owned()];
                svc
            })
            .row("database", database.is_some(), &[], move || {
                DatabaseServiceFactory::new(config).build(sel.database.driver, Environment::Prod)
            })
            .row("horizon", sel.horizon, &["backend", "redis"], move || {
                long_running(
                    config.backend_image_ref(),
                    network,
                    Some(artisan("horizon")),
                )
            })
            .row("scheduler", sel.scheduler, &["backend"], move || {
                long_running(
                    config.backend_image_ref(),
                    network,
                    Some(artisan("schedule:work")),
                )
            });

        for (index, command) in sel.deploy_services.iter().enumerate() {
            table = table.row(
                format!("worker-{}", index + 1),
                true,
                &["backend"],
                move || long_running(config.backend_image_ref(), network, Some(artisan(command))),
            );
        }

        table
    }

    pub fn assemble(&self) -> ComposeDocument {
        let services = self.table().assemble();
        tracing::debug!(services = ?services.names(), "assembled prod compose");

        let traefik = &self.config.traefik;
        let mut networks = IndexMap::from([(
            self.config.project.network.clone(),
            NetworkDefinition::default(),
        )]);
        if traefik.enabled {
            networks.insert(traefik.network.clone(), NetworkDefinition::external());
        }

        let volumes = self
            .selections
            .database
            .container_driver()
            .map(|driver| IndexMap::from([(volume_name(driver).to_owned(), VolumeDefinition {})]));

        ComposeDocument {
            services,
            networks,
            volumes,
        }
    }
}

fn artisan(command: &str) -> String {
    format!("php artisan {command}")
}

/// `sh -c "php artisan a && php artisan b"`: stops at the first failing job.
fn chain_jobs(jobs: &[String]) -> String {
    let chained = jobs
        .iter()
        .map(|job| artisan(job))
        .collect::<Vec<_>>()
        .join(" && ");
    format!(r#"sh -c "{chained}""#)
}

/// Pulled service restarted on failure with a fixed delay and retry budget.
fn long_running(image: String, network: &str, command: Option<String>) -> ServiceDefinition {
    let mut svc = ServiceDefinition::image(image);
    svc.command = command;
    svc.restart = Some(RestartMode::UnlessStopped);
    svc.networks = vec![network.to_owned()];
    svc.deploy = Some(DeployPolicy {
        replicas: 1,
        restart_policy: RestartPolicy {
            condition: RestartCondition::OnFailure,
            delay: Some(RESTART_DELAY.to_owned()),
            max_attempts: Some(MAX_ATTEMPTS),
        },
        labels: Vec::new(),
    });
    svc
}

/// Traefik labels routing `https://{domain}` to the frontend on port 80.
pub fn routing_labels(config: &Config) -> Vec<String> {
    let project = config.project_name();
    let traefik = &config.traefik;
    vec![
        "traefik.enable=true".to_owned(),
        format!(
            "traefik.http.routers.{project}.rule=Host(`{}`)",
            traefik.domain
        ),
        format!("traefik.http.routers.{project}.entrypoints=websecure"),
        format!("traefik.http.routers.{project}.tls=true"),
        format!(
            "traefik.http.routers.{project}.tls.certresolver={}",
            traefik.certresolver
        ),
        format!("traefik.http.services.{project}.loadbalancer.server.port=80"),
        format!("traefik.docker.network={}", traefik.network),
    ]
}
