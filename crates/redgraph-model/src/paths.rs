// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use crate::config::RedditConfig;

pub const DATA_FILE: &str = "reddit_data.npz";
pub const DEFAULT_BASE_URL: &str = "https://data.dgl.ai/";
pub const REMOTE_DATASET_PREFIX: &str = "dataset";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    pub archive: PathBuf,
    pub extract_dir: PathBuf,
    pub graph_file: PathBuf,
    pub data_file: PathBuf,
    pub remote_url: String,
}

#[must_use]
pub fn cache_paths(root: &Path, base_url: &str, config: &RedditConfig) -> CachePaths {
    let extract_dir = root.join(config.variant_name());
    CachePaths {
        archive: root.join(config.archive_file_name()),
        graph_file: extract_dir.join(config.graph_file_name()),
        data_file: extract_dir.join(DATA_FILE),
        extract_dir,
        remote_url: format!(
            "{}/{}/{}",
            base_url.trim_end_matches('/'),
            REMOTE_DATASET_PREFIX,
            config.archive_file_name()
        ),
    }
}
