// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};
use std::path::Path;

use redgraph_model::GraphError;

/// Malformed, truncated or missing cache content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError(pub String);

impl DecodeError {
    #[must_use]
    pub fn in_file(path: &Path, message: impl Display) -> Self {
        Self(format!("{}: {message}", path.display()))
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for DecodeError {}

/// Well-formed arrays that disagree with each other or with the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntegrityError {
    LengthMismatch {
        array: &'static str,
        expected: usize,
        actual: usize,
    },
    LabelOutOfRange {
        node: usize,
        label: i64,
        num_classes: usize,
    },
    Graph(GraphError),
}

impl Display for IntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LengthMismatch {
                array,
                expected,
                actual,
            } => write!(
                f,
                "`{array}` has {actual} entries but the graph has {expected} nodes"
            ),
            Self::LabelOutOfRange {
                node,
                label,
                num_classes,
            } => write!(
                f,
                "label {label} of node {node} outside [0, {num_classes})"
            ),
            Self::Graph(e) => write!(f, "graph rejected node data: {e}"),
        }
    }
}

impl std::error::Error for IntegrityError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Graph(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GraphError> for IntegrityError {
    fn from(value: GraphError) -> Self {
        Self::Graph(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    Decode(DecodeError),
    Integrity(IntegrityError),
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "decode failed: {e}"),
            Self::Integrity(e) => write!(f, "integrity check failed: {e}"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(e) => Some(e),
            Self::Integrity(e) => Some(e),
        }
    }
}

impl From<DecodeError> for IngestError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(value)
    }
}

impl From<IntegrityError> for IngestError {
    fn from(value: IntegrityError) -> Self {
        Self::Integrity(value)
    }
}
