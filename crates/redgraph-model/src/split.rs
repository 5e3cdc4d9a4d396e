// SPDX-License-Identifier: Apache-2.0

use ndarray::{ArcArray1, Array1, ArrayView1};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    Train,
    Validation,
    Test,
}

impl Split {
    pub const ALL: [Self; 3] = [Self::Train, Self::Validation, Self::Test];

    /// Node-type codes 1, 2 and 3 select train, validation and test. Any
    /// other code leaves the node out of every split.
    #[must_use]
    pub const fn from_node_type(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Train),
            2 => Some(Self::Validation),
            3 => Some(Self::Test),
            _ => None,
        }
    }

    #[must_use]
    pub const fn node_type_code(self) -> i64 {
        match self {
            Self::Train => 1,
            Self::Validation => 2,
            Self::Test => 3,
        }
    }

    #[must_use]
    pub const fn mask_name(self) -> &'static str {
        match self {
            Self::Train => crate::NDATA_TRAIN_MASK,
            Self::Validation => crate::NDATA_VAL_MASK,
            Self::Test => crate::NDATA_TEST_MASK,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCounts {
    pub train: usize,
    pub val: usize,
    pub test: usize,
    pub unassigned: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitMasks {
    pub train: ArcArray1<bool>,
    pub val: ArcArray1<bool>,
    pub test: ArcArray1<bool>,
}

impl SplitMasks {
    #[must_use]
    pub fn from_node_types(codes: ArrayView1<'_, i64>) -> Self {
        let select = |split: Split| -> ArcArray1<bool> {
            codes
                .iter()
                .map(|&code| Split::from_node_type(code) == Some(split))
                .collect::<Array1<bool>>()
                .into_shared()
        };
        Self {
            train: select(Split::Train),
            val: select(Split::Validation),
            test: select(Split::Test),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.train.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.train.is_empty()
    }

    #[must_use]
    pub fn mask(&self, split: Split) -> &ArcArray1<bool> {
        match split {
            Split::Train => &self.train,
            Split::Validation => &self.val,
            Split::Test => &self.test,
        }
    }

    #[must_use]
    pub fn counts(&self) -> SplitCounts {
        let count = |mask: &ArcArray1<bool>| mask.iter().filter(|&&m| m).count();
        let train = count(&self.train);
        let val = count(&self.val);
        let test = count(&self.test);
        SplitCounts {
            train,
            val,
            test,
            unassigned: self.len() - train - val - test,
        }
    }
}
