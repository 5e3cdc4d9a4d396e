// SPDX-License-Identifier: Apache-2.0

use ndarray::{ArcArray1, ArcArray2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum DType {
    Bool,
    Float32,
    Int64,
}

impl DType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float32 => "float32",
            Self::Int64 => "int64",
        }
    }
}

/// Node-level value attached to a [`crate::Graph`]. The first axis is the
/// node axis. Clones share the underlying buffer.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NodeData {
    Bool(ArcArray1<bool>),
    Float32(ArcArray2<f32>),
    Int64(ArcArray1<i64>),
}

impl NodeData {
    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::Bool(_) => DType::Bool,
            Self::Float32(_) => DType::Float32,
            Self::Int64(_) => DType::Int64,
        }
    }

    /// Number of rows along the node axis.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bool(a) => a.len(),
            Self::Float32(a) => a.nrows(),
            Self::Int64(a) => a.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Bool(a) => a.shape().to_vec(),
            Self::Float32(a) => a.shape().to_vec(),
            Self::Int64(a) => a.shape().to_vec(),
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&ArcArray1<bool>> {
        match self {
            Self::Bool(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float32(&self) -> Option<&ArcArray2<f32>> {
        match self {
            Self::Float32(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int64(&self) -> Option<&ArcArray1<i64>> {
        match self {
            Self::Int64(a) => Some(a),
            _ => None,
        }
    }
}

impl From<ArcArray1<bool>> for NodeData {
    fn from(value: ArcArray1<bool>) -> Self {
        Self::Bool(value)
    }
}

impl From<ArcArray2<f32>> for NodeData {
    fn from(value: ArcArray2<f32>) -> Self {
        Self::Float32(value)
    }
}

impl From<ArcArray1<i64>> for NodeData {
    fn from(value: ArcArray1<i64>) -> Self {
        Self::Int64(value)
    }
}
