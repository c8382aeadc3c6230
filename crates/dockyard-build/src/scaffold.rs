use std::path::{Path, PathBuf};

use dockyard_core::{DockyardConfig, Environment};

use crate::compose::{DevComposeAssembler, ProdComposeAssembler, RenderError};
use crate::dockerfile::{DockerfileGenerator, GITIGNORE};
use crate::env::EnvGenerator;
use crate::paths;

/// One file to be written, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFile {
    pub path: &'static str,
    pub contents: String,
}

/// Ordered set of files making up a scaffold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldPlan {
    files: Vec<ScaffoldFile>,
}

/// Files written and files left alone by [`ScaffoldPlan::write`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

impl ScaffoldPlan {
    /// Dockerfiles, nginx config and compose file of the dev stack.
    pub fn dev(config: &DockyardConfig) -> Result<Self, ScaffoldError> {
        let generator = DockerfileGenerator::new(&config.config);
        let compose = DevComposeAssembler::new(&config.config, &config.dev)
            .assemble()
            .to_yaml()
            .map_err(|source| ScaffoldError::Render {
                environment: Environment::Dev,
                source,
            })?;

        Ok(Self::from_files([
            (paths::DEV_BACKEND_DOCKERFILE, generator.dev_backend(&config.dev)),
            (paths::DEV_FRONTEND_DOCKERFILE, generator.dev_frontend()),
            (paths::DEV_NGINX_CONF, generator.nginx_conf()),
            (paths::DEV_NODE_DOCKERFILE, generator.dev_node()),
            (paths::DEV_COMPOSE, compose),
        ]))
    }

    /// Dockerfiles, nginx config, compose file and `.env.production` of the prod stack.
    pub fn prod(config: &DockyardConfig) -> Result<Self, ScaffoldError> {
        let generator = DockerfileGenerator::new(&config.config);
        let compose = ProdComposeAssembler::new(&config.config, &config.prod)
            .assemble()
            .to_yaml()
            .map_err(|source| ScaffoldError::Render {
                environment: Environment::Prod,
                source,
            })?;
        let env = EnvGenerator::new(&config.config).prod_template(&config.prod);

        Ok(Self::from_files([
            (paths::PROD_BACKEND_DOCKERFILE, generator.prod_backend(&config.prod)),
            (paths::PROD_FRONTEND_DOCKERFILE, generator.prod_frontend()),
            (paths::PROD_NGINX_CONF, generator.nginx_conf()),
            (paths::PROD_COMPOSE, compose),
            (paths::PROD_ENV, env),
        ]))
    }

    pub fn gitignore() -> Self {
        Self::from_files([(paths::DOCKER_GITIGNORE, GITIGNORE.to_owned())])
    }

    pub fn extend(&mut self, other: ScaffoldPlan) {
        self.files.extend(other.files);
    }

    pub fn files(&self) -> &[ScaffoldFile] {
        &self.files
    }

    /// Writes every file under `root`, creating parent directories.
    ///
    /// Existing files are skipped and reported unless `force` is set.
    pub fn write(&self, root: &Path, force: bool) -> Result<WriteReport, ScaffoldError> {
        let mut report = WriteReport::default();

        for file in &self.files {
            let target = root.join(file.path);
            if target.exists() && !force {
                tracing::debug!(path = file.path, "already exists, skipping");
                report.skipped.push(file.path);
                continue;
            }

            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ScaffoldError::CreateDir {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }

            std::fs::write(&target, &file.contents).map_err(|e| ScaffoldError::Write {
                path: target.clone(),
                source: e,
            })?;
            tracing::debug!(path = file.path, "wrote scaffold file");
            report.written.push(file.path);
        }

        Ok(report)
    }

    fn from_files<const N: usize>(files: [(&'static str, String); N]) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|(path, contents)| ScaffoldFile { path, contents })
                .collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    #[error("failed to render {environment} compose file")]
    Render {
        environment: Environment,
        source: RenderError,
    },
    #[error("failed to create directory {path}")]
    CreateDir { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}")]
    Write { path: PathBuf, source: std::io::Error },
}
