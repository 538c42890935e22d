use std::env;

/// Where release source archives are downloaded from
pub const DEFAULT_DOWNLOAD_URL: &str = "https://storage.googleapis.com/golang";

/// Web root of the public source repository that generated links point into
pub const DEFAULT_REPOSITORY_URL: &str = "https://github.com/golang/go";

/// Endpoints used for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL serving `go<version>.src.tar.gz`
    pub download_url: String,
    /// Repository web root used to build `blob/go<version>/...` links
    pub repository_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            repository_url: DEFAULT_REPOSITORY_URL.to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by `GOINTERFACES_DOWNLOAD_URL` and
    /// `GOINTERFACES_REPOSITORY_URL` when set (useful against a mirror).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            download_url: env::var("GOINTERFACES_DOWNLOAD_URL")
                .unwrap_or(defaults.download_url),
            repository_url: env::var("GOINTERFACES_REPOSITORY_URL")
                .unwrap_or(defaults.repository_url),
        }
    }

    /// URL of the compressed source archive for `version`
    pub fn archive_url(&self, version: &str) -> String {
        format!(
            "{}/go{}.src.tar.gz",
            self.download_url.trim_end_matches('/'),
            version
        )
    }

    /// Deep link to `line` of `path` as released in `version`
    pub fn source_link(&self, version: &str, path: &str, line: usize) -> String {
        format!(
            "{}/blob/go{}/{}#L{}",
            self.repository_url.trim_end_matches('/'),
            version,
            path,
            line
        )
    }
}
