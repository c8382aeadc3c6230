use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to read environment file {path}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("invalid value {value:?} for {var}: expected {expected}")]
    InvalidOverride {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("unknown database driver '{0}' (expected mariadb, mysql, postgresql, sqlite, or none)")]
    UnknownDriver(String),

    #[error("database driver '{0}' is not supported in production; use mariadb, mysql, postgresql, or none")]
    UnsupportedProductionDriver(crate::DatabaseDriver),
}
