// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

pub const CACHE_DIR_NAME: &str = "redgraph";

#[must_use]
pub fn resolve_cache_dir() -> PathBuf {
    resolve_cache_dir_from(|name| std::env::var(name).ok())
}

/// Resolution order: `$XDG_CACHE_HOME/redgraph`, `$HOME/.cache/redgraph`,
/// then a relative `.redgraph/cache`. Blank values are skipped.
#[must_use]
pub fn resolve_cache_dir_from<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |name: &str| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(xdg_cache_home) = non_blank("XDG_CACHE_HOME") {
        return PathBuf::from(xdg_cache_home).join(CACHE_DIR_NAME);
    }

    if let Some(home) = non_blank("HOME") {
        return PathBuf::from(home).join(".cache").join(CACHE_DIR_NAME);
    }

    PathBuf::from(".redgraph").join("cache")
}
