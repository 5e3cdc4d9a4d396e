// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Reddit dataset model: variant configuration, the deterministic cache
//! layout, the graph container and the node-level values attached to it.

mod attributes;
mod config;
mod graph;
mod node_data;
mod paths;
mod split;
mod summary;

pub use attributes::NodeAttributes;
pub use config::{RedditConfig, DATASET_NAME, SELF_LOOP_SUFFIX};
pub use graph::{Graph, GraphError, NodeId};
pub use node_data::{DType, NodeData};
pub use paths::{cache_paths, CachePaths, DATA_FILE, DEFAULT_BASE_URL, REMOTE_DATASET_PREFIX};
pub use split::{Split, SplitCounts, SplitMasks};
pub use summary::DatasetSummary;

pub const CRATE_NAME: &str = "redgraph-model";

/// Class count of the Reddit benchmark. Fixed by the dataset definition, not
/// derived from the stored labels.
pub const NUM_CLASSES: usize = 41;

pub const NDATA_TRAIN_MASK: &str = "train_mask";
pub const NDATA_VAL_MASK: &str = "val_mask";
pub const NDATA_TEST_MASK: &str = "test_mask";
pub const NDATA_FEAT: &str = "feat";
pub const NDATA_LABEL: &str = "label";
