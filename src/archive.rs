use crate::error::{Error, Result};
use crate::scanner::SourceFile;
use flate2::bufread::MultiGzDecoder;
use sha2::{Digest, Sha256};
use std::io::{self, BufRead, BufReader, Read};
use tracing::{debug, warn};

/// Leading bytes of every gzip member
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

const SOURCE_SUFFIX: &str = ".go";
const DOC_SUFFIX: &str = "doc.go";
const TEST_SUFFIX: &str = "_test.go";

/// Reader wrapper that hashes data as it's read.
/// The compressed archive is checksummed on its way through the pipeline
/// without being buffered.
pub struct DigestReader<R: Read> {
    inner: R,
    hasher: Sha256,
}

impl<R: Read> DigestReader<R> {
    pub fn new(inner: R) -> Self {
        DigestReader {
            inner,
            hasher: Sha256::new(),
        }
    }

    /// Finalize the digest and return the hex-encoded SHA-256 checksum
    pub fn finalize(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl<R: Read> Read for DigestReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// Outcome of advancing the entry iterator
pub enum ArchiveStep<E> {
    /// The next entry of the archive
    Entry(E),
    /// No more entries. `fault` holds the error that ended iteration early,
    /// if any; callers treat both cases as the end of the archive.
    Exhausted { fault: Option<io::Error> },
}

fn next_step<'a, R: Read>(entries: &mut tar::Entries<'a, R>) -> ArchiveStep<tar::Entry<'a, R>> {
    match entries.next() {
        Some(Ok(entry)) => ArchiveStep::Entry(entry),
        Some(Err(fault)) => ArchiveStep::Exhausted { fault: Some(fault) },
        None => ArchiveStep::Exhausted { fault: None },
    }
}

/// Decide whether the entry `name` is a source file worth scanning under
/// `source_root`, returning its package directory when it is.
///
/// Accepted entries end in `.go`, are neither `doc.go`-style documentation
/// nor `_test.go` files, and sit in a package directory below the root.
pub fn select_source(name: &str, source_root: &str) -> Option<SourceFile> {
    if !name.starts_with(source_root)
        || !name.ends_with(SOURCE_SUFFIX)
        || name.ends_with(DOC_SUFFIX)
        || name.ends_with(TEST_SUFFIX)
    {
        return None;
    }

    let relative = name[source_root.len()..].strip_prefix('/')?;
    let (package, _file_name) = relative.rsplit_once('/')?;
    if package.is_empty() {
        return None;
    }

    Some(SourceFile {
        path: name.to_string(),
        package: package.to_string(),
    })
}

type Decoder<R> = BufReader<MultiGzDecoder<BufReader<DigestReader<R>>>>;

/// A gzip-compressed tar stream traversed one entry at a time
pub struct SourceArchive<R: Read> {
    archive: tar::Archive<Decoder<R>>,
}

impl<R: Read> SourceArchive<R> {
    /// Wrap `reader` in the decompression and archive stages.
    ///
    /// Fails when the stream cannot be read, does not start like gzip, or
    /// carries a gzip header the decoder rejects.
    pub fn open(reader: R, version: &str) -> Result<Self> {
        let mut buffered = BufReader::new(DigestReader::new(reader));
        let head = buffered.fill_buf().map_err(|source| Error::Open {
            version: version.to_string(),
            source,
        })?;
        if !head.starts_with(&GZIP_MAGIC) {
            return Err(Error::NotGzip {
                version: version.to_string(),
            });
        }

        // The gzip header is only parsed on the first read; do it here so a
        // broken header fails the open instead of ending the traversal.
        let mut decoder = BufReader::new(MultiGzDecoder::new(buffered));
        decoder.fill_buf().map_err(|source| Error::Open {
            version: version.to_string(),
            source,
        })?;

        Ok(SourceArchive {
            archive: tar::Archive::new(decoder),
        })
    }

    /// Hand every source file below `source_root` to `visit`, in archive order.
    ///
    /// Errors from `visit` abort the traversal and are returned. An error while
    /// advancing to the next entry ends the traversal normally; it is returned
    /// as `Ok(Some(fault))` for diagnostics only.
    pub fn for_each_source<F>(&mut self, source_root: &str, mut visit: F) -> Result<Option<io::Error>>
    where
        F: FnMut(&SourceFile, &mut dyn Read) -> Result<()>,
    {
        let mut entries = match self.archive.entries() {
            Ok(entries) => entries,
            Err(fault) => return Ok(Some(fault)),
        };
        let mut seen = 0usize;
        let mut scanned = 0usize;

        let fault = loop {
            let mut entry = match next_step(&mut entries) {
                ArchiveStep::Entry(entry) => entry,
                ArchiveStep::Exhausted { fault } => break fault,
            };
            seen += 1;

            let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
            if let Some(file) = select_source(&name, source_root) {
                scanned += 1;
                visit(&file, &mut entry)?;
            }
        };

        debug!(entries = seen, scanned, "archive traversal finished");
        Ok(fault)
    }

    /// Drain whatever the traversal left unread and return the SHA-256 of the
    /// complete compressed stream, or `None` when draining fails.
    pub fn finish(self) -> Option<String> {
        let mut buffered = self.archive.into_inner().into_inner().into_inner();
        match io::copy(&mut buffered, &mut io::sink()) {
            Ok(rest) => {
                debug!(bytes = rest, "drained archive trailer");
                Some(buffered.into_inner().finalize())
            }
            Err(e) => {
                warn!("Failed to drain archive stream, digest unavailable: {}", e);
                None
            }
        }
    }
}
