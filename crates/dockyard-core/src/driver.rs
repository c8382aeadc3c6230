//! Database driver lookup table.
//!
//! Every driver-keyed decision (connection name, port, packages, extensions,
//! container environment convention, data directory, volume name) is answered
//! by [`DatabaseDriver::profile`]. Adding a driver means adding a variant and
//! one profile entry here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Database engine selected for an environment.
///
/// `Sqlite` and `None` never produce a database container. Production only
/// accepts `Mariadb`, `Mysql`, `Postgresql` and `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DatabaseDriver {
    Mariadb,
    Mysql,
    Postgresql,
    Sqlite,
    None,
}

/// Naming convention for the container's bootstrap environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEnvStyle {
    /// `MYSQL_ROOT_PASSWORD`, `MYSQL_DATABASE`, `MYSQL_USER`, `MYSQL_PASSWORD`
    MysqlFamily,
    /// `POSTGRES_DB`, `POSTGRES_USER`, `POSTGRES_PASSWORD`
    Postgres,
}

/// Static facts about a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverProfile {
    /// Value written as `DB_CONNECTION`.
    pub connection: Option<&'static str>,
    /// Port the database listens on inside its container.
    pub port: Option<u16>,
    /// Debian package providing the command-line client.
    pub client_package: Option<&'static str>,
    /// PHP extension installed into the backend image.
    pub php_extension: Option<&'static str>,
    /// Development headers the PHP extension compiles against.
    pub build_library: Option<&'static str>,
    /// Container environment convention; `None` for drivers without a container.
    pub env_style: Option<ContainerEnvStyle>,
    /// Data directory inside the database container.
    pub data_dir: Option<&'static str>,
    /// Named volume used in production.
    pub volume_name: Option<&'static str>,
}

const MYSQL_FAMILY: DriverProfile = DriverProfile {
    connection: Some("mysql"),
    port: Some(3306),
    client_package: Some("default-mysql-client"),
    php_extension: Some("pdo_mysql"),
    build_library: None,
    env_style: Some(ContainerEnvStyle::MysqlFamily),
    data_dir: Some("/var/lib/mysql"),
    volume_name: Some("mariadb_data"),
};

const POSTGRESQL: DriverProfile = DriverProfile {
    connection: Some("pgsql"),
    port: Some(5432),
    client_package: Some("postgresql-client"),
    php_extension: Some("pdo_pgsql"),
    build_library: Some("libpq-dev"),
    env_style: Some(ContainerEnvStyle::Postgres),
    data_dir: Some("/var/lib/postgresql/data"),
    volume_name: Some("postgres_data"),
};

const SQLITE: DriverProfile = DriverProfile {
    connection: Some("sqlite"),
    port: None,
    client_package: Some("sqlite3"),
    php_extension: Some("pdo_sqlite"),
    build_library: Some("libsqlite3-dev"),
    env_style: None,
    data_dir: None,
    volume_name: None,
};

const NO_DATABASE: DriverProfile = DriverProfile {
    connection: None,
    port: None,
    client_package: None,
    php_extension: None,
    build_library: None,
    env_style: None,
    data_dir: None,
    volume_name: None,
};

impl DatabaseDriver {
    /// All drivers, in declaration order.
    pub const ALL: [DatabaseDriver; 5] = [
        DatabaseDriver::Mariadb,
        DatabaseDriver::Mysql,
        DatabaseDriver::Postgresql,
        DatabaseDriver::Sqlite,
        DatabaseDriver::None,
    ];

    pub fn profile(self) -> &'static DriverProfile {
        match self {
            DatabaseDriver::Mariadb | DatabaseDriver::Mysql => &MYSQL_FAMILY,
            DatabaseDriver::Postgresql => &POSTGRESQL,
            DatabaseDriver::Sqlite => &SQLITE,
            DatabaseDriver::None => &NO_DATABASE,
        }
    }

    /// Lowercase name as used in configuration and the image table.
    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseDriver::Mariadb => "mariadb",
            DatabaseDriver::Mysql => "mysql",
            DatabaseDriver::Postgresql => "postgresql",
            DatabaseDriver::Sqlite => "sqlite",
            DatabaseDriver::None => "none",
        }
    }

    /// Whether this driver runs as its own container.
    pub fn has_container(self) -> bool {
        self.profile().env_style.is_some()
    }

    /// Whether this driver may be selected for production.
    pub fn allowed_in_production(self) -> bool {
        self != DatabaseDriver::Sqlite
    }
}

impl fmt::Display for DatabaseDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseDriver {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatabaseDriver::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| crate::Error::UnknownDriver(s.to_owned()))
    }
}

impl TryFrom<String> for DatabaseDriver {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
