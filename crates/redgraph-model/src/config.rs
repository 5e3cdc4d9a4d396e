// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const DATASET_NAME: &str = "reddit";
pub const SELF_LOOP_SUFFIX: &str = "_self_loop";

/// Selects one of the two published archive variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedditConfig {
    pub self_loop: bool,
}

impl RedditConfig {
    #[must_use]
    pub const fn new(self_loop: bool) -> Self {
        Self { self_loop }
    }

    #[must_use]
    pub const fn variant_suffix(&self) -> &'static str {
        if self.self_loop {
            SELF_LOOP_SUFFIX
        } else {
            ""
        }
    }

    /// `reddit` or `reddit_self_loop`.
    #[must_use]
    pub fn variant_name(&self) -> String {
        format!("{DATASET_NAME}{}", self.variant_suffix())
    }

    #[must_use]
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", self.variant_name())
    }

    #[must_use]
    pub fn graph_file_name(&self) -> String {
        format!("{}_graph.npz", self.variant_name())
    }
}

impl Display for RedditConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.variant_name())
    }
}
