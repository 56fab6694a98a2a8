use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to open data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unable to read data file {path}: {source}")]
    DataFile {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("document id space exhausted after {0} documents")]
    CorpusFull(u64),
}

pub type Result<T> = std::result::Result<T, Error>;
