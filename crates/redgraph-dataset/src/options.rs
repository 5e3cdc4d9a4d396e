// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use redgraph_core::resolve_cache_dir;
use redgraph_model::{cache_paths, CachePaths, RedditConfig, DEFAULT_BASE_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetOptions {
    pub config: RedditConfig,
    pub cache_root: PathBuf,
    pub base_url: String,
    /// Hex digest the downloaded archive must match; unchecked when `None`.
    pub expected_archive_sha256: Option<String>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            config: RedditConfig::default(),
            cache_root: resolve_cache_dir(),
            base_url: DEFAULT_BASE_URL.to_string(),
            expected_archive_sha256: None,
        }
    }
}

impl DatasetOptions {
    #[must_use]
    pub fn new(self_loop: bool) -> Self {
        Self {
            config: RedditConfig::new(self_loop),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn paths(&self) -> CachePaths {
        cache_paths(&self.cache_root, &self.base_url, &self.config)
    }
}
