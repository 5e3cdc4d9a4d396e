// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use redgraph_core::sha256_file_hex;
use redgraph_model::CachePaths;
use tracing::{debug, info};

use crate::error::{StoreError, StoreErrorCode};
use crate::extract::{ArchiveExtractor, ZipExtractor};
use crate::instrumentation::{FetchInstrumentation, NoopInstrumentation};
use crate::source::{ArchiveSource, HttpArchiveSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
    pub bytes_downloaded: u64,
    pub entries_extracted: usize,
}

/// Downloads and extracts the dataset archive on demand.
pub struct Fetcher {
    source: Box<dyn ArchiveSource>,
    extractor: Box<dyn ArchiveExtractor>,
    instrumentation: Arc<dyn FetchInstrumentation>,
}

impl Fetcher {
    #[must_use]
    pub fn new(source: Box<dyn ArchiveSource>, extractor: Box<dyn ArchiveExtractor>) -> Self {
        Self {
            source,
            extractor,
            instrumentation: Arc::new(NoopInstrumentation),
        }
    }

    /// HTTP download plus zip extraction.
    #[must_use]
    pub fn http() -> Self {
        Self::new(Box::new(HttpArchiveSource::new()), Box::new(ZipExtractor))
    }

    #[must_use]
    pub fn with_instrumentation(mut self, instrumentation: Arc<dyn FetchInstrumentation>) -> Self {
        self.instrumentation = instrumentation;
        self
    }

    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Fetches `paths.remote_url` into `paths.archive`, verifies it against
    /// `expected_sha256` when given, and re-extracts it into
    /// `paths.extract_dir`.
    pub fn remediate(
        &self,
        paths: &CachePaths,
        expected_sha256: Option<&str>,
    ) -> Result<FetchReport, StoreError> {
        self.remediate_inner(paths, expected_sha256).map_err(|e| {
            self.instrumentation.observe_error(self.source.name(), e.code);
            e
        })
    }

    fn remediate_inner(
        &self,
        paths: &CachePaths,
        expected_sha256: Option<&str>,
    ) -> Result<FetchReport, StoreError> {
        if let Some(parent) = paths.archive.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent.display(), &e))?;
        }
        match fs::remove_file(&paths.archive) {
            Ok(()) => debug!(archive = %paths.archive.display(), "removed stale archive"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(StoreError::io(paths.archive.display(), &e)),
        }

        let started = Instant::now();
        let bytes = self.source.download(&paths.remote_url, &paths.archive)?;
        self.instrumentation
            .observe_download(self.source.name(), bytes, started.elapsed());
        info!(
            url = %paths.remote_url,
            archive = %paths.archive.display(),
            bytes,
            source = self.source.name(),
            "archive downloaded"
        );

        if let Some(expected) = expected_sha256 {
            verify_sha256(&paths.archive, expected)?;
        }

        let started = Instant::now();
        let entries = self.extractor.extract(&paths.archive, &paths.extract_dir)?;
        self.instrumentation.observe_extract(entries, started.elapsed());
        info!(
            extract_dir = %paths.extract_dir.display(),
            entries,
            "archive extracted"
        );

        Ok(FetchReport {
            bytes_downloaded: bytes,
            entries_extracted: entries,
        })
    }
}

/// A mismatching archive is deleted before the error is returned.
fn verify_sha256(archive: &Path, expected: &str) -> Result<(), StoreError> {
    let actual = sha256_file_hex(archive).map_err(|e| StoreError::io(archive.display(), &e))?;
    if actual.eq_ignore_ascii_case(expected.trim()) {
        return Ok(());
    }
    let _ = fs::remove_file(archive);
    Err(StoreError::new(
        StoreErrorCode::Checksum,
        format!(
            "{}: sha256 {actual} does not match expected {}",
            archive.display(),
            expected.trim()
        ),
    ))
}
