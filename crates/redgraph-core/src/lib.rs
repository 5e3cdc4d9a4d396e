// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod cache_dir;

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io;
use std::path::Path;

pub use cache_dir::{resolve_cache_dir, resolve_cache_dir_from, CACHE_DIR_NAME};

pub const CRATE_NAME: &str = "redgraph-core";

/// Streams a file through SHA-256 without buffering it whole.
pub fn sha256_file_hex(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}
