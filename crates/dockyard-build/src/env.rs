//! Application environment values derived from the same selections the
//! compose assemblers use.

use dockyard_core::{Config, DatabaseDriver, DevSelections, ProdSelections};
use indexmap::IndexMap;

const SQLITE_DATABASE_PATH: &str = "database/database.sqlite";

/// Derives `.env` values for dev and the `.env.production` body for prod.
pub struct EnvGenerator<'a> {
    config: &'a Config,
}

impl<'a> EnvGenerator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Values to patch into the local `.env` so the app reaches its containers.
    ///
    /// Only enabled features contribute keys; a disabled feature adds nothing.
    pub fn dev_values(&self, selections: &DevSelections) -> IndexMap<String, String> {
        let mut values = IndexMap::new();
        let mut set = |key: &str, value: &str| {
            values.insert(key.to_owned(), value.to_owned());
        };

        let db = selections.database;
        if db.enabled {
            match db.driver {
                DatabaseDriver::None => {}
                DatabaseDriver::Sqlite => {
                    set("DB_CONNECTION", connection(db.driver));
                    set("DB_DATABASE", SQLITE_DATABASE_PATH);
                }
                driver => {
                    let database = &self.config.database;
                    set("DB_CONNECTION", connection(driver));
                    set("DB_HOST", "database");
                    set("DB_PORT", &port(driver).to_string());
                    set("DB_DATABASE", &database.name);
                    set("DB_USERNAME", &database.user);
                    set("DB_PASSWORD", &database.password);
                }
            }
        }

        if selections.redis {
            set("REDIS_HOST", "redis");
            set("REDIS_PORT", "6379");
            set("CACHE_DRIVER", "redis");
            set("SESSION_DRIVER", "redis");
            set("QUEUE_CONNECTION", "redis");
        }

        if selections.mailhog {
            set("MAIL_MAILER", "smtp");
            set("MAIL_HOST", "mailhog");
            set("MAIL_PORT", "1025");
            set("MAIL_USERNAME", "null");
            set("MAIL_PASSWORD", "null");
            set("MAIL_ENCRYPTION", "null");
        }

        tracing::debug!(keys = values.len(), "derived dev env values");
        values
    }

    /// Full `.env.production` body. Blocks are separated by blank lines and the
    /// file ends with a newline after the final blank line.
    ///
    /// Configured values are written verbatim, unlike [`format_env_line`].
    pub fn prod_template(&self, selections: &ProdSelections) -> String {
        let config = self.config;
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!("APP_NAME={}", config.project.app_name));
        lines.push("APP_ENV=production".to_owned());
        lines.push("APP_KEY=".to_owned());
        lines.push("APP_DEBUG=false".to_owned());
        lines.push(format!("APP_URL=https://{}", config.traefik.domain));
        lines.push(String::new());

        match selections.database.container_driver() {
            Some(driver) => {
                let database = &config.database;
                lines.push(format!("DB_CONNECTION={}", connection(driver)));
                lines.push("DB_HOST=database".to_owned());
                lines.push(format!("DB_PORT={}", port(driver)));
                lines.push(format!("DB_DATABASE={}", database.name));
                lines.push(format!("DB_USERNAME={}", database.user));
                lines.push(format!("DB_PASSWORD={}", database.password));
            }
            None => lines.extend(
                [
                    "# External database - configure as needed",
                    "DB_CONNECTION=mysql",
                    "DB_HOST=",
                    "DB_PORT=3306",
                    "DB_DATABASE=",
                    "DB_USERNAME=",
                    "DB_PASSWORD=",
                ]
                .map(str::to_owned),
            ),
        }
        lines.push(String::new());

        let cache_block: &[&str] = if selections.redis {
            &[
                "REDIS_HOST=redis",
                "REDIS_PORT=6379",
                "CACHE_DRIVER=redis",
                "SESSION_DRIVER=redis",
                "QUEUE_CONNECTION=redis",
            ]
        } else {
            &[
                "# Redis not enabled - configure as needed",
                "CACHE_DRIVER=file",
                "SESSION_DRIVER=file",
                "QUEUE_CONNECTION=sync",
            ]
        };
        lines.extend(cache_block.iter().map(|l| (*l).to_owned()));
        lines.push(String::new());

        lines.extend(
            [
                "LOG_CHANNEL=stack",
                "LOG_LEVEL=error",
                "",
                "MAIL_MAILER=smtp",
                "MAIL_HOST=",
                "MAIL_PORT=587",
                "MAIL_USERNAME=",
                "MAIL_PASSWORD=",
                "MAIL_ENCRYPTION=tls",
                "",
            ]
            .map(str::to_owned),
        );

        let mut body = lines.join("\n");
        body.push('\n');
        body
    }
}

/// `KEY=value`, or `KEY="value"` when the value is empty or contains
/// whitespace or `#`.
pub fn format_env_line(key: &str, value: &str) -> String {
    if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '#') {
        format!("{key}=\"{value}\"")
    } else {
        format!("{key}={value}")
    }
}

fn connection(driver: DatabaseDriver) -> &'static str {
    match driver.profile().connection {
        Some(connection) => connection,
        None => "mysql",
    }
}

fn port(driver: DatabaseDriver) -> u16 {
    match driver.profile().port {
        Some(port) => port,
        None => 3306,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_quotes_empty_values() {
        assert_eq!(format_env_line("FOO", ""), r#"FOO="""#);
    }

    #[test]
    fn format_quotes_whitespace() {
        assert_eq!(format_env_line("FOO", "a b"), r#"FOO="a b""#);
        assert_eq!(format_env_line("FOO", "a\tb"), "FOO=\"a\tb\"");
    }

    #[test]
    fn format_quotes_hash() {
        assert_eq!(format_env_line("FOO", "pa#ss"), r#"FOO="pa#ss""#);
    }

    #[test]
    fn format_leaves_plain_values_bare() {
        assert_eq!(format_env_line("FOO", "bar"), "FOO=bar");
        assert_eq!(format_env_line("URL", "https://x.test/a?b=c"), "URL=https://x.test/a?b=c");
    }

    #[test]
    fn connection_and_port_by_driver() {
        assert_eq!(connection(DatabaseDriver::Postgresql), "pgsql");
        assert_eq!(port(DatabaseDriver::Postgresql), 5432);
        assert_eq!(connection(DatabaseDriver::Mariadb), "mysql");
        assert_eq!(connection(DatabaseDriver::Mysql), "mysql");
        assert_eq!(port(DatabaseDriver::Mysql), 3306);
        assert_eq!(connection(DatabaseDriver::Sqlite), "sqlite");
    }
}
