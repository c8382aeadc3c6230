//! Paths of generated files, relative to the project root.

pub const DEV_BACKEND_DOCKERFILE: &str = ".docker/dev/backend/Dockerfile";
pub const DEV_FRONTEND_DOCKERFILE: &str = ".docker/dev/frontend/Dockerfile";
pub const DEV_NGINX_CONF: &str = ".docker/dev/frontend/conf.d/app.conf";
pub const DEV_NODE_DOCKERFILE: &str = ".docker/dev/node/Dockerfile";
pub const DEV_COMPOSE: &str = "docker-compose.yml";

pub const PROD_BACKEND_DOCKERFILE: &str = ".docker/prod/backend/Dockerfile";
pub const PROD_FRONTEND_DOCKERFILE: &str = ".docker/prod/frontend/Dockerfile";
pub const PROD_NGINX_CONF: &str = ".docker/prod/frontend/conf.d/app.conf";
pub const PROD_COMPOSE: &str = ".docker/prod/docker-compose.yml";
pub const PROD_ENV: &str = ".docker/prod/.env.production";

pub const DOCKER_GITIGNORE: &str = ".docker/.gitignore";

pub const ENV_FILE: &str = ".env";
pub const ENV_EXAMPLE_FILE: &str = ".env.example";
