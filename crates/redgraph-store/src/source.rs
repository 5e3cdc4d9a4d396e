// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::{StoreError, StoreErrorCode};

const PART_SUFFIX: &str = ".part";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Download primitive: places the archive at `url` onto `destination` and
/// returns the byte count. `destination` either holds the complete archive
/// afterwards or does not exist.
pub trait ArchiveSource: Send + Sync {
    fn name(&self) -> &'static str;
    fn download(&self, url: &str, destination: &Path) -> Result<u64, StoreError>;
}

#[must_use]
pub fn part_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    destination.with_file_name(name)
}

/// Runs `fill` against `<destination>.part`, syncs it and renames it over
/// `destination`. The part file is removed on failure.
fn publish_via_part<F>(destination: &Path, fill: F) -> Result<u64, StoreError>
where
    F: FnOnce(&mut File) -> Result<u64, StoreError>,
{
    let part = part_path(destination);
    let result = (|| {
        let mut file =
            File::create(&part).map_err(|e| StoreError::io(part.display(), &e))?;
        let bytes = fill(&mut file)?;
        file.flush()
            .and_then(|()| file.sync_all())
            .map_err(|e| StoreError::io(part.display(), &e))?;
        drop(file);
        fs::rename(&part, destination)
            .map_err(|e| StoreError::io(destination.display(), &e))?;
        Ok(bytes)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&part);
    }
    result
}

pub struct HttpArchiveSource {
    client: Client,
}

impl HttpArchiveSource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                // Unbounded; the body is a multi-gigabyte archive.
                .timeout(Option::<Duration>::None)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpArchiveSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveSource for HttpArchiveSource {
    fn name(&self) -> &'static str {
        "http"
    }

    fn download(&self, url: &str, destination: &Path) -> Result<u64, StoreError> {
        let mut resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| StoreError::new(StoreErrorCode::Network, format!("GET {url}: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let code = if status == StatusCode::NOT_FOUND {
                StoreErrorCode::NotFound
            } else {
                StoreErrorCode::Network
            };
            return Err(StoreError::new(code, format!("GET {url}: status {status}")));
        }
        debug!(url, content_length = ?resp.content_length(), "archive download start");
        publish_via_part(destination, |file| {
            resp.copy_to(file).map_err(|e| {
                StoreError::new(StoreErrorCode::Network, format!("GET {url}: {e}"))
            })
        })
    }
}

/// Serves archives from a local directory holding `<mirror>/<file name of url>`.
#[derive(Debug, Clone)]
pub struct LocalMirrorSource {
    root: PathBuf,
}

impl LocalMirrorSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, url: &str) -> Result<PathBuf, StoreError> {
        let name = url
            .rsplit('/')
            .next()
            .filter(|n| !n.is_empty() && *n != "." && *n != "..")
            .ok_or_else(|| {
                StoreError::new(
                    StoreErrorCode::NotFound,
                    format!("no archive file name in `{url}`"),
                )
            })?;
        Ok(self.root.join(name))
    }
}

impl ArchiveSource for LocalMirrorSource {
    fn name(&self) -> &'static str {
        "local_mirror"
    }

    fn download(&self, url: &str, destination: &Path) -> Result<u64, StoreError> {
        let source = self.resolve(url)?;
        let mut input = match File::open(&source) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::new(
                    StoreErrorCode::NotFound,
                    format!("{} not present in mirror", source.display()),
                ))
            }
            Err(e) => return Err(StoreError::io(source.display(), &e)),
        };
        publish_via_part(destination, |file| {
            io::copy(&mut input, file).map_err(|e| StoreError::io(source.display(), &e))
        })
    }
}
