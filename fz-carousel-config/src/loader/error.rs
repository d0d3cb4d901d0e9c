use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config file {path} does not exist")]
    MissingConfig { path: PathBuf },
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid carousel config from {origin}")]
    Parse {
        origin: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("invalid value {value:?} for {key}")]
    InvalidOverride { key: String, value: String },
}
