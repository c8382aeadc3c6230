use dockyard_core::{Config, DatabaseSelection, DevSelections, ProdSelections};

use crate::paths;

/// Contents of `.docker/.gitignore`.
pub const GITIGNORE: &str = "# Keep production secrets out of git\nprod/.env.production\n";

const BASE_PACKAGES: [&str; 5] = ["git", "curl", "zip", "unzip", "libzip-dev"];
const BASE_EXTENSIONS: [&str; 3] = ["zip", "pcntl", "bcmath"];

/// Renders the Dockerfiles and nginx configs of the dev and prod stacks.
pub struct DockerfileGenerator<'a> {
    config: &'a Config,
}

impl<'a> DockerfileGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn dev_backend(&self, selections: &DevSelections) -> String {
        let toolchain = Toolchain::resolve(&selections.database, selections.redis);
        format!(
            r#"FROM php:{php}-fpm

{toolchain}
COPY --from=composer:2 /usr/bin/composer /usr/bin/composer

WORKDIR /var/www

EXPOSE 9000
CMD ["php-fpm"]
"#,
            php = self.config.versions.php,
            toolchain = toolchain.render(),
        )
    }

    pub fn dev_frontend(&self) -> String {
        r#"FROM nginx:alpine

COPY .docker/dev/frontend/conf.d/app.conf /etc/nginx/conf.d/default.conf

WORKDIR /var/www

EXPOSE 80
"#
        .to_owned()
    }

    pub fn dev_node(&self) -> String {
        format!(
            r#"FROM node:{node}-alpine

WORKDIR /var/www

EXPOSE 5173
"#,
            node = self.config.versions.node,
        )
    }

    /// Nginx site serving `public/` and handing PHP to `backend:9000`.
    /// Used by both stacks.
    pub fn nginx_conf(&self) -> String {
        r#"server {
    listen 80;
    server_name _;
    root /var/www/public;
    index index.php index.html;

    client_max_body_size 64M;

    location / {
        try_files $uri $uri/ /index.php?$query_string;
    }

    location ~ \.php$ {
        fastcgi_pass backend:9000;
        fastcgi_index index.php;
        fastcgi_param SCRIPT_FILENAME /var/www/public$fastcgi_script_name;
        include fastcgi_params;
    }

    location ~ /\.(?!well-known).* {
        deny all;
    }
}
"#
        .to_owned()
    }

    /// Multi-stage build: composer vendor, vite assets, then the php-fpm runtime.
    pub fn prod_backend(&self, selections: &ProdSelections) -> String {
        let toolchain = Toolchain::resolve(&selections.database, selections.redis);
        let env_copy = if selections.env_in_image {
            format!("COPY {} .env\n", paths::PROD_ENV)
        } else {
            String::new()
        };

        format!(
            r#"# === Stage 1: PHP dependencies ===
FROM composer:2 AS vendor
WORKDIR /app
COPY composer.json composer.lock ./
RUN composer install --no-dev --no-scripts --no-autoloader --prefer-dist --no-interaction

# === Stage 2: Frontend assets ===
FROM node:{node}-alpine AS assets
WORKDIR /app
COPY package.json package-lock.json* ./
RUN npm ci
COPY . .
RUN npm run build

# === Stage 3: Runtime ===
FROM php:{php}-fpm

{toolchain}
COPY --from=composer:2 /usr/bin/composer /usr/bin/composer

WORKDIR /var/www
COPY . .
COPY --from=vendor /app/vendor ./vendor
COPY --from=assets /app/public/build ./public/build
{env_copy}RUN composer dump-autoload --optimize --no-dev \
    && chown -R www-data:www-data storage bootstrap/cache

EXPOSE 9000
CMD ["php-fpm"]
"#,
            node = self.config.versions.node,
            php = self.config.versions.php,
            toolchain = toolchain.render(),
            env_copy = env_copy,
        )
    }

    /// Nginx image carrying the public assets of the pushed backend image.
    pub fn prod_frontend(&self) -> String {
        format!(
            r#"FROM {backend} AS app

FROM nginx:alpine

COPY .docker/prod/frontend/conf.d/app.conf /etc/nginx/conf.d/default.conf
COPY --from=app /var/www/public /var/www/public

EXPOSE 80
"#,
            backend = self.config.backend_image_ref(),
        )
    }
}

/// System packages and PHP extensions installed into the backend image.
#[derive(Debug, Default, PartialEq, Eq)]
struct Toolchain {
    packages: Vec<&'static str>,
    extensions: Vec<&'static str>,
    pecl_redis: bool,
}

impl Toolchain {
    fn resolve(database: &DatabaseSelection, redis: bool) -> Self {
        let mut toolchain = Toolchain {
            packages: BASE_PACKAGES.to_vec(),
            extensions: Vec::new(),
            pecl_redis: redis,
        };
        if database.enabled {
            let profile = database.driver.profile();
            toolchain.packages.extend(profile.build_library);
            toolchain.packages.extend(profile.client_package);
            toolchain.extensions.extend(profile.php_extension);
        }
        toolchain.extensions.extend(BASE_EXTENSIONS);
        toolchain
    }

    fn render(&self) -> String {
        let mut out = format!(
            "RUN apt-get update && apt-get install -y {} && rm -rf /var/lib/apt/lists/*\n",
            self.packages.join(" ")
        );
        out.push_str(&format!(
            "RUN docker-php-ext-install {}\n",
            self.extensions.join(" ")
        ));
        if self.pecl_redis {
            out.push_str("RUN pecl install redis && docker-php-ext-enable redis\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockyard_core::DatabaseDriver;

    fn dev(driver: DatabaseDriver, redis: bool) -> DevSelections {
        DevSelections {
            database: DatabaseSelection::new(true, driver),
            redis,
            ..DevSelections::default()
        }
    }

    #[test]
    fn dev_backend_uses_configured_php() {
        let mut config = Config::default();
        config.versions.php = "8.3".to_owned();
        let out = DockerfileGenerator::new(&config).dev_backend(&dev(DatabaseDriver::Mariadb, true));
        assert!(out.starts_with("FROM php:8.3-fpm\n"));
        assert!(out.contains("docker-php-ext-install pdo_mysql zip pcntl bcmath"));
        assert!(out.contains("default-mysql-client"));
        assert!(out.contains("pecl install redis"));
    }

    #[test]
    fn postgres_pulls_libpq() {
        let config = Config::default();
        let out =
            DockerfileGenerator::new(&config).dev_backend(&dev(DatabaseDriver::Postgresql, false));
        assert!(out.contains("libpq-dev postgresql-client"));
        assert!(out.contains("pdo_pgsql"));
        assert!(!out.contains("pecl install redis"));
    }

    #[test]
    fn disabled_database_installs_no_driver() {
        let db = DatabaseSelection::new(false, DatabaseDriver::Postgresql);
        let toolchain = Toolchain::resolve(&db, false);
        assert_eq!(toolchain.packages, BASE_PACKAGES.to_vec());
        assert_eq!(toolchain.extensions, BASE_EXTENSIONS.to_vec());
    }

    #[test]
    fn none_driver_installs_no_driver() {
        let db = DatabaseSelection::new(true, DatabaseDriver::None);
        let toolchain = Toolchain::resolve(&db, true);
        assert_eq!(toolchain.extensions, BASE_EXTENSIONS.to_vec());
        assert!(toolchain.pecl_redis);
    }

    #[test]
    fn nginx_hands_php_to_backend() {
        let config = Config::default();
        let conf = DockerfileGenerator::new(&config).nginx_conf();
        assert!(conf.contains("fastcgi_pass backend:9000;"));
        assert!(conf.contains("root /var/www/public;"));
    }

    #[test]
    fn node_image_follows_version() {
        let mut config = Config::default();
        config.versions.node = "20".to_owned();
        assert!(
            DockerfileGenerator::new(&config)
                .dev_node()
                .starts_with("FROM node:20-alpine\n")
        );
    }

    #[test]
    fn prod_backend_env_copy_is_gated() {
        let config = Config::default();
        let generator = DockerfileGenerator::new(&config);
        let mut sel = ProdSelections::default();

        assert!(
            generator
                .prod_backend(&sel)
                .contains("COPY .docker/prod/.env.production .env\n")
        );

        sel.env_in_image = false;
        assert!(!generator.prod_backend(&sel).contains(".env.production"));
    }

    #[test]
    fn prod_frontend_copies_from_backend_image() {
        let config = Config::default();
        let out = DockerfileGenerator::new(&config).prod_frontend();
        assert!(out.starts_with("FROM registry.digitalocean.com/myregistry/backend:latest AS app\n"));
        assert!(out.contains("COPY --from=app /var/www/public /var/www/public"));
    }

    #[test]
    fn gitignore_keeps_secrets_out() {
        assert_eq!(
            GITIGNORE,
            "# Keep production secrets out of git\nprod/.env.production\n"
        );
    }
}
