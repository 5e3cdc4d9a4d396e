// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::Path;

use ndarray::{arr1, Array1, Array2};
use ndarray_npy::NpzWriter;
use redgraph_ingest::append_string_scalar;

pub type BundleWriter = NpzWriter<Cursor<Vec<u8>>>;

/// Writes an `.npz` built by `add`, appending a scipy `format` tag when given.
pub fn write_bundle(path: &Path, format: Option<&str>, add: impl FnOnce(&mut BundleWriter)) {
    let mut npz = NpzWriter::new(Cursor::new(Vec::new()));
    add(&mut npz);
    let mut bytes = npz.finish().expect("finish npz");
    if let Some(tag) = format {
        bytes = append_string_scalar(bytes, "format", tag).expect("format tag");
    }
    fs::write(path, bytes.into_inner()).expect("write bundle");
}

pub fn coo_bundle(path: &Path, shape: (i64, i64), rows: &[i32], cols: &[i32]) {
    write_bundle(path, Some("coo"), |npz| {
        npz.add_array("row", &arr1(rows)).expect("row");
        npz.add_array("col", &arr1(cols)).expect("col");
        npz.add_array("shape", &arr1(&[shape.0, shape.1])).expect("shape");
        npz.add_array("data", &Array1::<f32>::ones(rows.len()))
            .expect("data");
    });
}

pub fn attribute_bundle(path: &Path, num_nodes: usize, labels: &[i64], node_types: &[i64]) {
    write_bundle(path, None, |npz| {
        npz.add_array("feature", &Array2::<f32>::from_elem((num_nodes, 2), 0.5))
            .expect("feature");
        npz.add_array("label", &arr1(labels)).expect("label");
        npz.add_array("node_types", &arr1(node_types))
            .expect("node_types");
    });
}
