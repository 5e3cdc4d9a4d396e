// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetSummary {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_feats: usize,
    pub num_classes: usize,
    pub num_train: usize,
    pub num_val: usize,
    pub num_test: usize,
}

impl Display for DatasetSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "NumNodes: {}", self.num_nodes)?;
        writeln!(f, "NumEdges: {}", self.num_edges)?;
        writeln!(f, "NumFeats: {}", self.num_feats)?;
        writeln!(f, "NumClasses: {}", self.num_classes)?;
        writeln!(f, "NumTrainingSamples: {}", self.num_train)?;
        writeln!(f, "NumValidationSamples: {}", self.num_val)?;
        write!(f, "NumTestSamples: {}", self.num_test)
    }
}
