// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Public entry point: [`RedditDataset`] loads the Reddit post graph for node
//! classification, fetching and healing the local cache as needed.

mod dataset;
mod error;
mod logging;
mod options;

pub use dataset::RedditDataset;
pub use error::{DatasetError, DatasetErrorKind, UsageError};
pub use logging::{LoadEvent, LoadLog, LoadStage};
pub use options::DatasetOptions;

pub use redgraph_model::{
    DatasetSummary, Graph, NodeAttributes, NodeData, RedditConfig, Split, SplitMasks,
    NDATA_FEAT, NDATA_LABEL, NDATA_TEST_MASK, NDATA_TRAIN_MASK, NDATA_VAL_MASK, NUM_CLASSES,
};
pub use redgraph_store::{Fetcher, RemediationState};

pub const CRATE_NAME: &str = "redgraph-dataset";
