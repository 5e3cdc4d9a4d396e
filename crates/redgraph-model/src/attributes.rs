// SPDX-License-Identifier: Apache-2.0

use ndarray::{ArcArray1, ArcArray2};

/// Dense per-node arrays decoded from the attribute bundle, indexed by node
/// id.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttributes {
    pub feature: ArcArray2<f32>,
    pub label: ArcArray1<i64>,
    pub node_type: ArcArray1<i64>,
}

impl NodeAttributes {
    #[must_use]
    pub fn feature_rows(&self) -> usize {
        self.feature.nrows()
    }

    #[must_use]
    pub fn feature_width(&self) -> usize {
        self.feature.ncols()
    }
}
