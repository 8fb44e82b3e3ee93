use std::path::PathBuf;

/// Errors surfaced by configuration and argument parsing.
///
/// The timer core never fails: invalid transitions are no-ops.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config format in {path}: {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    InvalidDuration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
