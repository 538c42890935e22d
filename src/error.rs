use thiserror::Error;

/// Conditions that abort a whole run
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {url}: HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Archive for version {version} is not a gzip stream")]
    NotGzip { version: String },

    #[error("Failed to open archive for version {version}: {source}")]
    Open {
        version: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing source file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
