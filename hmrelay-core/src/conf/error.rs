use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // IO
    #[error("missing configuration file path")]
    MissingPath,

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing
    #[error("unsupported config format for {path} (expected .json, .toml or .hcl)")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to parse JSON in {path}: {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse TOML in {path}: {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse HCL in {path}: {source}")]
    ParseHcl {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    // Validation
    #[error("metron_port is a required property for hmrelay")]
    MissingMetronPort,

    #[error("{field} must be between 0 and 65535, got {value}")]
    InvalidPort { field: &'static str, value: i64 },

    #[error("{first} and {second} are both set to port {port}")]
    PortConflict {
        first: &'static str,
        second: &'static str,
        port: u16,
    },

    #[error("queue_capacity must be greater than zero")]
    EmptyQueue,
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }
}
