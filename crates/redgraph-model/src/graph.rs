// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::{PoisonError, RwLock};

use crate::node_data::NodeData;

pub type NodeId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    EndpointCountMismatch { rows: usize, cols: usize },
    TooManyNodes { num_nodes: usize },
    NodeOutOfRange { node: NodeId, num_nodes: usize },
    NodeDataLength {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl Display for GraphError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndpointCountMismatch { rows, cols } => write!(
                f,
                "coordinate list has {rows} row indices but {cols} column indices"
            ),
            Self::TooManyNodes { num_nodes } => {
                write!(f, "{num_nodes} nodes exceed the u32 node id space")
            }
            Self::NodeOutOfRange { node, num_nodes } => {
                write!(f, "node {node} out of range for {num_nodes} nodes")
            }
            Self::NodeDataLength {
                name,
                expected,
                actual,
            } => write!(
                f,
                "node data `{name}` has {actual} rows, graph has {expected} nodes"
            ),
        }
    }
}

impl std::error::Error for GraphError {}

/// Directed graph stored as a coordinate list, plus named node-data slots.
///
/// Topology is fixed at construction. Node data sits behind a lock so a
/// shared `Arc<Graph>` can be re-annotated in place.
#[derive(Debug)]
pub struct Graph {
    num_nodes: usize,
    src: Vec<NodeId>,
    dst: Vec<NodeId>,
    ndata: RwLock<BTreeMap<String, NodeData>>,
}

impl Graph {
    /// Builds a graph with one edge per `(rows[i], cols[i])` pair. Duplicate
    /// pairs and self-loops are kept as given.
    pub fn from_coo(
        num_nodes: usize,
        rows: Vec<NodeId>,
        cols: Vec<NodeId>,
    ) -> Result<Self, GraphError> {
        if rows.len() != cols.len() {
            return Err(GraphError::EndpointCountMismatch {
                rows: rows.len(),
                cols: cols.len(),
            });
        }
        if num_nodes as u64 > u64::from(NodeId::MAX) + 1 {
            return Err(GraphError::TooManyNodes { num_nodes });
        }
        if let Some(&node) = rows
            .iter()
            .chain(cols.iter())
            .find(|&&n| n as usize >= num_nodes)
        {
            return Err(GraphError::NodeOutOfRange { node, num_nodes });
        }
        Ok(Self {
            num_nodes,
            src: rows,
            dst: cols,
            ndata: RwLock::new(BTreeMap::new()),
        })
    }

    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.src.len()
    }

    /// Source and destination endpoints, index-aligned.
    #[must_use]
    pub fn edges(&self) -> (&[NodeId], &[NodeId]) {
        (&self.src, &self.dst)
    }

    /// Inserts or replaces a node-data slot. The value must have one row per
    /// node.
    pub fn set_ndata(&self, name: impl Into<String>, value: NodeData) -> Result<(), GraphError> {
        let name = name.into();
        if value.len() != self.num_nodes {
            return Err(GraphError::NodeDataLength {
                name,
                expected: self.num_nodes,
                actual: value.len(),
            });
        }
        self.ndata
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, value);
        Ok(())
    }

    #[must_use]
    pub fn ndata(&self, name: &str) -> Option<NodeData> {
        self.ndata
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    #[must_use]
    pub fn ndata_keys(&self) -> Vec<String> {
        self.ndata
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
