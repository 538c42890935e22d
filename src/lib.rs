//! gointerfaces - Catalog of exported interfaces in Go source releases
//!
//! This library downloads released Go source archives and lists every
//! top-level `type Name interface {` declaration of the standard library,
//! merged across versions into one sorted table with links to the sources.
//! It feeds generated documentation that tracks interfaces per Go version.
//!
//! # Key Features
//!
//! - **True streaming**: HTTP body → gzip → tar → line scanner, never holding
//!   the archive in memory
//! - **Layout aware**: picks `go/src/pkg` or `go/src` depending on the release
//! - **Deterministic merging**: per version, then across versions, last write wins
//! - **Checksummed**: the compressed archive is SHA-256 hashed as it streams
//!
//! # Example
//!
//! ```no_run
//! use gointerfaces::{collect_interfaces, Config, Report};
//!
//! let interfaces = collect_interfaces(&["1.17", "1.18"], &Config::default()).unwrap();
//! let report = Report::new(interfaces);
//! report.write_table(&mut std::io::stdout()).unwrap();
//! ```
//!
//! Scanning is purely lexical: one declaration per physical line. Multi-line
//! declarations, generics and declarations inside literals are not handled.

pub mod archive;
pub mod catalog;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod version;

pub use archive::{ArchiveStep, DigestReader, SourceArchive};
pub use catalog::{merge, Interface, InterfaceLocation, InterfaceMap};
pub use config::Config;
pub use error::{Error, Result};
pub use report::Report;
pub use scanner::{scan_source, SourceFile};

use std::io::Read;
use std::time::Duration;
use tracing::{debug, info};

/// Collect interfaces for every version, in order, into one map.
///
/// Versions are processed one after another; when two versions declare the
/// same interface, the location from the later one is kept. Requests have no
/// timeout, so a stalled download blocks the run rather than truncating it.
pub fn collect_interfaces<S: AsRef<str>>(versions: &[S], config: &Config) -> Result<InterfaceMap> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("gointerfaces/", env!("CARGO_PKG_VERSION")))
        // Downloads block for as long as the server takes; no deadline
        .timeout(None::<Duration>)
        .build()
        .map_err(Error::Client)?;

    let mut interfaces = InterfaceMap::default();
    for version in versions {
        let found = interfaces_for_version(&client, version.as_ref(), config)?;
        merge(&mut interfaces, found);
    }
    Ok(interfaces)
}

/// Download the source archive of `version` and scan it
pub fn interfaces_for_version(
    client: &reqwest::blocking::Client,
    version: &str,
    config: &Config,
) -> Result<InterfaceMap> {
    info!("Generating interface list for version {}...", version);

    let url = config.archive_url(version);
    let response = client.get(&url).send().map_err(|source| Error::Fetch {
        url: url.clone(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status { url, status });
    }

    // The response is dropped, closing the connection, on every exit path
    interfaces_from_archive(response, version, config)
}

/// Scan an already opened `.tar.gz` stream of the sources of `version`
pub fn interfaces_from_archive<R: Read>(reader: R, version: &str, config: &Config) -> Result<InterfaceMap> {
    let source_root = version::source_root(version);
    let mut archive = SourceArchive::open(reader, version)?;
    let mut interfaces = InterfaceMap::default();

    let fault = archive.for_each_source(source_root, |file, content| {
        let found = scan_source(content, file, version, config)?;
        merge(&mut interfaces, found);
        Ok(())
    })?;
    if let Some(fault) = fault {
        debug!(version, "archive ended early: {}", fault);
    }

    if let Some(digest) = archive.finish() {
        info!(version, sha256 = %digest, "archive checksum");
    }
    debug!(version, interfaces = interfaces.len(), "version scanned");

    Ok(interfaces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::tar_gz;

    #[test]
    fn test_legacy_layout_selected_for_old_versions() {
        let bytes = tar_gz(&[
            ("go/src/pkg/io/io.go", "package io\n\ntype Reader interface {\n}\n"),
            ("go/src/cmd/go/main.go", "package main\n\ntype Runner interface {\n}\n"),
        ]);

        let result = interfaces_from_archive(&bytes[..], "1.3.3", &Config::default()).unwrap();

        assert_eq!(result.len(), 1);
        let (interface, location) = result.iter().next().unwrap();
        assert_eq!(interface.name, "Reader");
        assert_eq!(interface.package, "io");
        assert_eq!(location.source_file, "src/pkg/io/io.go");
        assert_eq!(location.line_number, 3);
    }

    #[test]
    fn test_modern_layout_scans_whole_src_tree() {
        let bytes = tar_gz(&[
            ("go/src/io/io.go", "type Reader interface {\n"),
            ("go/src/cmd/go/main.go", "type Runner interface {\n"),
            ("go/test/fixedbugs/bug.go", "type Ignored interface {\n"),
        ]);

        let result = interfaces_from_archive(&bytes[..], "1.18", &Config::default()).unwrap();

        let mut packages: Vec<&str> = result.keys().map(|i| i.package.as_str()).collect();
        packages.sort();
        assert_eq!(packages, vec!["cmd/go", "io"]);
    }

    #[test]
    fn test_later_file_wins_within_version() {
        let bytes = tar_gz(&[
            ("go/src/os/file_unix.go", "\ntype Signal interface {\n"),
            ("go/src/os/file_windows.go", "\n\n\ntype Signal interface {\n"),
        ]);

        let result = interfaces_from_archive(&bytes[..], "1.18", &Config::default()).unwrap();

        assert_eq!(result.len(), 1);
        let location = result.values().next().unwrap();
        assert_eq!(location.source_file, "src/os/file_windows.go");
        assert_eq!(location.line_number, 4);
    }
}
