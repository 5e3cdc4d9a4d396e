// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use ndarray::{Array1, Array2, ArrayD, Ix2};
use redgraph_model::{NodeAttributes, NUM_CLASSES};
use tracing::debug;

use crate::bundle::NpzBundle;
use crate::error::{DecodeError, IngestError, IntegrityError};

pub const KEY_FEATURE: &str = "feature";
pub const KEY_LABEL: &str = "label";
pub const KEY_NODE_TYPES: &str = "node_types";

/// Loads `feature`, `label` and `node_types` from the attribute bundle and
/// checks them against the graph's node count.
pub fn load_attributes(path: &Path, num_nodes: usize) -> Result<NodeAttributes, IngestError> {
    let mut npz = NpzBundle::open(path)?;
    let wrap = |e: DecodeError| DecodeError::in_file(path, e);

    let feature = feature_matrix(npz.read_f32(KEY_FEATURE)?).map_err(wrap)?;
    let label = integer_vector(&npz.read_i64(KEY_LABEL)?, KEY_LABEL, true).map_err(wrap)?;
    let node_type =
        integer_vector(&npz.read_i64(KEY_NODE_TYPES)?, KEY_NODE_TYPES, false).map_err(wrap)?;

    check_len(KEY_FEATURE, num_nodes, feature.nrows())?;
    check_len(KEY_LABEL, num_nodes, label.len())?;
    check_len(KEY_NODE_TYPES, num_nodes, node_type.len())?;
    if let Some((node, &value)) = label
        .iter()
        .enumerate()
        .find(|&(_, &l)| l < 0 || l as u64 >= NUM_CLASSES as u64)
    {
        return Err(IntegrityError::LabelOutOfRange {
            node,
            label: value,
            num_classes: NUM_CLASSES,
        }
        .into());
    }

    debug!(
        path = %path.display(),
        num_nodes,
        num_feats = feature.ncols(),
        "decoded node attributes"
    );
    Ok(NodeAttributes {
        feature: feature.into_shared(),
        label: label.into_shared(),
        node_type: node_type.into_shared(),
    })
}

fn check_len(array: &'static str, expected: usize, actual: usize) -> Result<(), IntegrityError> {
    if expected == actual {
        Ok(())
    } else {
        Err(IntegrityError::LengthMismatch {
            array,
            expected,
            actual,
        })
    }
}

/// Node-major float32 matrix; Fortran-ordered input is copied into
/// standard layout.
fn feature_matrix(array: ArrayD<f32>) -> Result<Array2<f32>, DecodeError> {
    let shape = array.shape().to_vec();
    let matrix = array.into_dimensionality::<Ix2>().map_err(|_| {
        DecodeError(format!("`{KEY_FEATURE}` must be 2-D, shape is {shape:?}"))
    })?;
    if matrix.is_standard_layout() {
        Ok(matrix)
    } else {
        Ok(matrix.as_standard_layout().into_owned())
    }
}

/// 1-D integer column. A trailing unit axis (`[N, 1]`) is accepted where
/// `allow_column` is set.
fn integer_vector(
    array: &ArrayD<i64>,
    name: &str,
    allow_column: bool,
) -> Result<Array1<i64>, DecodeError> {
    match array.shape() {
        [_] => {}
        [_, 1] if allow_column => {}
        shape => {
            return Err(DecodeError(format!(
                "`{name}` must be 1-D, shape is {shape:?}"
            )))
        }
    }
    Ok(array.iter().copied().collect())
}
