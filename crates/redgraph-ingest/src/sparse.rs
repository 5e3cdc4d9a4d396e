// SPDX-License-Identifier: Apache-2.0

//! Sparse matrices in the `scipy.sparse.save_npz` layout.

use std::fmt::{Display, Formatter};
use std::path::Path;

use ndarray::ArrayD;
use redgraph_model::NodeId;

use crate::bundle::NpzBundle;
use crate::error::DecodeError;
use crate::scalar::read_string_scalar;

const KEY_FORMAT: &str = "format";
const KEY_SHAPE: &str = "shape";
const KEY_ROW: &str = "row";
const KEY_COL: &str = "col";
const KEY_INDICES: &str = "indices";
const KEY_INDPTR: &str = "indptr";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SparseFormat {
    Coo,
    Csr,
    Csc,
}

impl SparseFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coo => "coo",
            Self::Csr => "csr",
            Self::Csc => "csc",
        }
    }

    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "coo" => Some(Self::Coo),
            "csr" => Some(Self::Csr),
            "csc" => Some(Self::Csc),
            _ => None,
        }
    }
}

impl Display for SparseFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coordinate list of the stored entries, in storage order. Values are not
/// retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooMatrix {
    pub nrows: usize,
    pub ncols: usize,
    pub rows: Vec<NodeId>,
    pub cols: Vec<NodeId>,
}

impl CooMatrix {
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.rows.len()
    }
}

pub fn read_sparse_npz(path: &Path) -> Result<(SparseFormat, CooMatrix), DecodeError> {
    let tag = read_string_scalar(path, KEY_FORMAT)?;
    let format = SparseFormat::parse(&tag).ok_or_else(|| {
        DecodeError::in_file(path, format!("unsupported sparse format `{tag}`"))
    })?;
    let mut npz = NpzBundle::open(path)?;
    let (nrows, ncols) = read_shape(&npz.read_i64(KEY_SHAPE)?).map_err(|e| npz.error(e))?;

    let matrix = match format {
        SparseFormat::Coo => {
            let rows = node_ids(&mut npz, KEY_ROW, nrows)?;
            let cols = node_ids(&mut npz, KEY_COL, ncols)?;
            coo_from_parts(nrows, ncols, rows, cols)
        }
        SparseFormat::Csr | SparseFormat::Csc => {
            let major = if format == SparseFormat::Csr {
                Axis::Rows
            } else {
                Axis::Cols
            };
            let (major_len, minor_len) = major.lengths(nrows, ncols);
            let minor = node_ids(&mut npz, KEY_INDICES, minor_len)?;
            let indptr = npz.read_i64(KEY_INDPTR)?;
            one_dimensional(indptr.shape(), KEY_INDPTR).map_err(|e| npz.error(e))?;
            let indptr: Vec<i64> = indptr.iter().copied().collect();
            expand_indptr(&indptr, major_len, minor.len()).map(|outer| {
                let (rows, cols) = match major {
                    Axis::Rows => (outer, minor),
                    Axis::Cols => (minor, outer),
                };
                CooMatrix {
                    nrows,
                    ncols,
                    rows,
                    cols,
                }
            })
        }
    }
    .map_err(|e| npz.error(format!("{format} matrix: {e}")))?;
    Ok((format, matrix))
}

fn read_shape(array: &ArrayD<i64>) -> Result<(usize, usize), DecodeError> {
    let dims: Vec<i64> = array.iter().copied().collect();
    let limit = u64::from(NodeId::MAX) + 1;
    match (array.ndim(), dims.as_slice()) {
        (1, &[r, c]) if r >= 0 && c >= 0 && (r as u64) <= limit && (c as u64) <= limit => {
            Ok((r as usize, c as usize))
        }
        _ => Err(DecodeError(format!("invalid sparse shape {dims:?}"))),
    }
}

fn one_dimensional(shape: &[usize], name: &str) -> Result<(), DecodeError> {
    if shape.len() == 1 {
        Ok(())
    } else {
        Err(DecodeError(format!("`{name}` must be 1-D, shape is {shape:?}")))
    }
}

/// Reads an index array as node ids in `[0, bound)`. int32 storage, the
/// scipy default, is converted without an int64 intermediate.
fn node_ids(npz: &mut NpzBundle, key: &str, bound: usize) -> Result<Vec<NodeId>, DecodeError> {
    let checked = match npz.try_read::<i32>(key)? {
        Some(narrow) => checked_ids(&narrow, key, bound),
        None => checked_ids(&npz.read_i64(key)?, key, bound),
    };
    checked.map_err(|e| npz.error(e))
}

fn checked_ids<T: Copy + Into<i64>>(
    array: &ArrayD<T>,
    name: &str,
    bound: usize,
) -> Result<Vec<NodeId>, DecodeError> {
    one_dimensional(array.shape(), name)?;
    let mut ids = Vec::with_capacity(array.len());
    for (i, &value) in array.iter().enumerate() {
        let v: i64 = value.into();
        if v < 0 || v as u64 >= bound as u64 {
            return Err(DecodeError(format!(
                "`{name}` index {v} at position {i} outside [0, {bound})"
            )));
        }
        // `bound` fits the node id space, see `read_shape`.
        ids.push(v as NodeId);
    }
    Ok(ids)
}

fn coo_from_parts(
    nrows: usize,
    ncols: usize,
    rows: Vec<NodeId>,
    cols: Vec<NodeId>,
) -> Result<CooMatrix, DecodeError> {
    if rows.len() != cols.len() {
        return Err(DecodeError(format!(
            "{} row indices but {} column indices",
            rows.len(),
            cols.len()
        )));
    }
    Ok(CooMatrix {
        nrows,
        ncols,
        rows,
        cols,
    })
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Cols,
}

impl Axis {
    /// `(major, minor)` extents for a matrix compressed along `self`.
    fn lengths(self, nrows: usize, ncols: usize) -> (usize, usize) {
        match self {
            Self::Rows => (nrows, ncols),
            Self::Cols => (ncols, nrows),
        }
    }
}

/// Expands a compressed index pointer to one major-axis id per stored entry.
fn expand_indptr(indptr: &[i64], major_len: usize, nnz: usize) -> Result<Vec<NodeId>, DecodeError> {
    if indptr.len() != major_len + 1 {
        return Err(DecodeError(format!(
            "indptr has {} entries, expected {}",
            indptr.len(),
            major_len + 1
        )));
    }
    let ends_at_nnz = indptr.last().map(|&v| v as u64) == Some(nnz as u64);
    if indptr.first() != Some(&0) || !ends_at_nnz {
        return Err(DecodeError(format!("indptr must run from 0 to {nnz}")));
    }
    if indptr.windows(2).any(|w| w[1] < w[0]) {
        return Err(DecodeError("indptr is not monotonic".to_string()));
    }

    let mut expanded = Vec::with_capacity(nnz);
    for (outer, bounds) in indptr.windows(2).enumerate() {
        let count = (bounds[1] - bounds[0]) as usize;
        expanded.extend(std::iter::repeat(outer as NodeId).take(count));
    }
    Ok(expanded)
}
