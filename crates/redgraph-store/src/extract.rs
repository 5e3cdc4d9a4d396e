// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::error::{StoreError, StoreErrorCode};

const STAGING_SUFFIX: &str = ".staging";

/// Extract primitive: unpacks `archive` so that `target` holds exactly its
/// contents, returning the entry count.
pub trait ArchiveExtractor: Send + Sync {
    fn extract(&self, archive: &Path, target: &Path) -> Result<usize, StoreError>;
}

#[must_use]
pub fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(OsString::from).unwrap_or_default();
    name.push(STAGING_SUFFIX);
    target.with_file_name(name)
}

fn remove_dir_if_present(dir: &Path) -> Result<(), StoreError> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(dir.display(), &e)),
    }
}

/// Zip backend. Entries land in a sibling staging directory which then
/// replaces `target` wholesale.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZipExtractor;

impl ArchiveExtractor for ZipExtractor {
    fn extract(&self, archive: &Path, target: &Path) -> Result<usize, StoreError> {
        let file = File::open(archive).map_err(|e| StoreError::io(archive.display(), &e))?;
        let mut zip = ZipArchive::new(BufReader::new(file)).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Archive,
                format!("{}: {e}", archive.display()),
            )
        })?;
        let entries = zip.len();

        let staging = staging_path(target);
        remove_dir_if_present(&staging)?;
        fs::create_dir_all(&staging).map_err(|e| StoreError::io(staging.display(), &e))?;
        if let Err(e) = zip.extract(&staging) {
            let _ = fs::remove_dir_all(&staging);
            return Err(StoreError::new(
                StoreErrorCode::Archive,
                format!("{}: {e}", archive.display()),
            ));
        }

        remove_dir_if_present(target)?;
        fs::rename(&staging, target).map_err(|e| StoreError::io(target.display(), &e))?;
        Ok(entries)
    }
}
