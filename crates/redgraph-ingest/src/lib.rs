// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Decoders for the extracted Reddit cache: typed `.npz` reads, the scipy
//! sparse adjacency bundle and the dense attribute bundle.

mod attributes;
mod bundle;
mod error;
mod graph;
mod scalar;
mod sparse;

pub use attributes::{load_attributes, KEY_FEATURE, KEY_LABEL, KEY_NODE_TYPES};
pub use bundle::NpzBundle;
pub use error::{DecodeError, IngestError, IntegrityError};
pub use graph::decode_graph;
pub use scalar::{append_string_scalar, read_string_scalar};
pub use sparse::{read_sparse_npz, CooMatrix, SparseFormat};

pub const CRATE_NAME: &str = "redgraph-ingest";
