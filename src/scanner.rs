use crate::catalog::{Interface, InterfaceLocation, InterfaceMap};
use crate::config::Config;
use crate::error::{Error, Result};
use regex::bytes::Regex;
use std::io::{BufRead, BufReader, Read};
use std::sync::OnceLock;

/// Directory name holding test fixtures; nothing beneath it is reported
pub const TESTDATA_DIR: &str = "testdata";

/// Top-level directory every release archive unpacks into
const ARCHIVE_ROOT: &str = "go/";

/// An archive entry accepted for scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full entry name, e.g. `go/src/net/http/server.go`
    pub path: String,
    /// Directory relative to the source root, e.g. `net/http`
    pub package: String,
}

impl SourceFile {
    /// Entry path without the archive's top-level `go/` directory, which is
    /// how the file is addressed in the source repository.
    pub fn repository_path(&self) -> &str {
        self.path.strip_prefix(ARCHIVE_ROOT).unwrap_or(&self.path)
    }

    /// Whether the file lives anywhere below a test fixture directory
    pub fn is_testdata(&self) -> bool {
        self.package.split('/').any(|dir| dir == TESTDATA_DIR)
    }
}

/// Matches one exported interface declaration on a single physical line:
///
/// ```text
/// type Name interface {
/// ```
///
/// Leading whitespace and trailing content are allowed. ASCII classes only.
fn declaration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?-u)^\s*type\s+([A-Z]\w*)\s+interface\s+\{")
            .expect("interface declaration pattern is valid")
    })
}

/// Scan one source file line by line and collect its interface declarations.
///
/// Lines are split on `\n`; a final line without a terminator is still
/// scanned. Files below a `testdata` directory yield an empty map without
/// reading the stream. Any read failure is returned as [`Error::Read`].
pub fn scan_source<R: Read>(
    reader: R,
    file: &SourceFile,
    version: &str,
    config: &Config,
) -> Result<InterfaceMap> {
    let mut interfaces = InterfaceMap::default();
    if file.is_testdata() {
        return Ok(interfaces);
    }

    let pattern = declaration_pattern();
    let source_file = file.repository_path();
    let mut buf_reader = BufReader::new(reader);
    let mut line = Vec::new();
    let mut line_number = 0;

    loop {
        line.clear();
        let n = buf_reader
            .read_until(b'\n', &mut line)
            .map_err(|source| Error::Read {
                path: file.path.clone(),
                source,
            })?;
        if n == 0 {
            break; // EOF
        }
        line_number += 1;

        if let Some(captures) = pattern.captures(&line) {
            // The capture is ASCII by construction
            let name = String::from_utf8_lossy(&captures[1]).into_owned();
            interfaces.insert(
                Interface {
                    name,
                    package: file.package.clone(),
                },
                InterfaceLocation {
                    version: version.to_string(),
                    source_file: source_file.to_string(),
                    line_number,
                    link: config.source_link(version, source_file, line_number),
                },
            );
        }
    }

    Ok(interfaces)
}
