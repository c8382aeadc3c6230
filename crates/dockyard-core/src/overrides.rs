//! `DOCKER_*` environment overrides and `.env` reading.

use std::path::Path;

use indexmap::IndexMap;

use crate::Config;

/// Environment variable lookup used while resolving overrides.
pub type EnvLookup<'a> = dyn Fn(&str) -> Option<String> + 'a;

/// Read `KEY=VALUE` pairs from a dotenv file without touching the process
/// environment. A missing file yields an empty map.
pub fn read_env_file(path: &Path) -> crate::Result<IndexMap<String, String>> {
    if !path.exists() {
        return Ok(IndexMap::new());
    }

    let iter = dotenvy::from_path_iter(path).map_err(|e| crate::Error::EnvFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut values = IndexMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| crate::Error::EnvFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        values.insert(key, value);
    }

    tracing::debug!(path = %path.display(), keys = values.len(), "read env file");
    Ok(values)
}

/// `"My Shop"` -> `"myshop"`: lowercase with whitespace removed.
pub fn project_slug(app_name: &str) -> String {
    app_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Apply every recognised `DOCKER_*` override found through `lookup`.
pub fn apply(config: &mut Config, lookup: &EnvLookup<'_>) -> crate::Result<()> {
    let text = |var: &'static str, slot: &mut String| {
        if let Some(value) = lookup(var) {
            tracing::debug!(var, "applying environment override");
            *slot = value;
        }
    };

    if let Some(name) = lookup("DOCKER_PROJECT_NAME") {
        config.project.name = Some(name);
    }
    text("DOCKER_NETWORK_NAME", &mut config.project.network);
    text("DOCKER_PHP_VERSION", &mut config.versions.php);
    text("DOCKER_NODE_VERSION", &mut config.versions.node);
    text("DOCKER_DB_NAME", &mut config.database.name);
    text("DOCKER_DB_USER", &mut config.database.user);
    text("DOCKER_DB_PASSWORD", &mut config.database.password);
    text("DOCKER_REGISTRY_URL", &mut config.registry.url);
    text("DOCKER_REGISTRY_BACKEND", &mut config.registry.backend_image);
    text("DOCKER_REGISTRY_FRONTEND", &mut config.registry.frontend_image);
    text("DOCKER_TRAEFIK_DOMAIN", &mut config.traefik.domain);
    text("DOCKER_TRAEFIK_NETWORK", &mut config.traefik.network);
    text("DOCKER_TRAEFIK_CERTRESOLVER", &mut config.traefik.certresolver);

    let ports = &mut config.ports;
    for (var, slot) in [
        ("DOCKER_PORT_FRONTEND", &mut ports.frontend),
        ("DOCKER_PORT_VITE", &mut ports.vite),
        ("DOCKER_PORT_DATABASE", &mut ports.database),
        ("DOCKER_PORT_REDIS", &mut ports.redis),
        ("DOCKER_PORT_MAILHOG_SMTP", &mut ports.mailhog_smtp),
        ("DOCKER_PORT_MAILHOG_WEB", &mut ports.mailhog_web),
    ] {
        if let Some(value) = lookup(var) {
            *slot = parse_port(var, &value)?;
        }
    }

    if let Some(value) = lookup("DOCKER_TRAEFIK_ENABLED") {
        config.traefik.enabled = parse_bool("DOCKER_TRAEFIK_ENABLED", &value)?;
    }

    Ok(())
}

fn parse_port(var: &'static str, value: &str) -> crate::Result<u16> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| crate::Error::InvalidOverride {
            var,
            value: value.to_owned(),
            expected: "a port number (0-65535)",
        })
}

fn parse_bool(var: &'static str, value: &str) -> crate::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(crate::Error::InvalidOverride {
            var,
            value: value.to_owned(),
            expected: "a boolean (true/false)",
        }),
    }
}
