// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use ndarray::{arr1, Array1, Array2};
use ndarray_npy::NpzWriter;
use redgraph_dataset::{DatasetOptions, Fetcher, RedditConfig};
use redgraph_ingest::append_string_scalar;
use redgraph_store::{FetchMetricsCollector, LocalMirrorSource, ZipExtractor};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const MIRROR_URL: &str = "https://mirror.invalid/";

/// Six nodes, seven edges including one self-loop.
pub struct Fixture {
    pub rows: Vec<i32>,
    pub cols: Vec<i32>,
    pub num_feats: usize,
    pub labels: Vec<i64>,
    pub node_types: Vec<i64>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            rows: vec![0, 1, 2, 3, 4, 5, 0],
            cols: vec![1, 2, 3, 4, 5, 0, 0],
            num_feats: 3,
            labels: vec![0, 1, 2, 40, 5, 6],
            node_types: vec![1, 1, 2, 3, 0, 1],
        }
    }
}

impl Fixture {
    pub fn num_nodes(&self) -> usize {
        self.labels.len()
    }

    pub fn graph_npz(&self) -> Vec<u8> {
        let n = self.num_nodes() as i64;
        let mut npz = NpzWriter::new(Cursor::new(Vec::new()));
        npz.add_array("row", &arr1(&self.rows)).expect("row");
        npz.add_array("col", &arr1(&self.cols)).expect("col");
        npz.add_array("shape", &arr1(&[n, n])).expect("shape");
        npz.add_array("data", &Array1::<f32>::ones(self.rows.len()))
            .expect("data");
        let bundle = npz.finish().expect("finish npz");
        append_string_scalar(bundle, "format", "coo")
            .expect("format tag")
            .into_inner()
    }

    pub fn data_npz(&self) -> Vec<u8> {
        let n = self.num_nodes();
        let features = Array2::from_shape_fn((n, self.num_feats), |(i, j)| {
            (i * self.num_feats + j) as f32
        });
        let mut npz = NpzWriter::new(Cursor::new(Vec::new()));
        npz.add_array("feature", &features).expect("feature");
        npz.add_array("label", &arr1(&self.labels)).expect("label");
        npz.add_array("node_types", &arr1(&self.node_types))
            .expect("types");
        npz.finish().expect("finish npz").into_inner()
    }

    /// Writes `<mirror>/reddit<suffix>.zip` holding both bundles.
    pub fn publish(&self, mirror: &Path, config: RedditConfig) {
        self.publish_with_graph(mirror, config, &self.graph_npz());
    }

    pub fn publish_with_graph(&self, mirror: &Path, config: RedditConfig, graph_npz: &[u8]) {
        let archive = mirror.join(config.archive_file_name());
        let mut zip = ZipWriter::new(File::create(archive).expect("create archive"));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(config.graph_file_name(), options)
            .expect("graph member");
        zip.write_all(graph_npz).expect("write graph");
        zip.start_file("reddit_data.npz", options)
            .expect("data member");
        zip.write_all(&self.data_npz()).expect("write data");
        zip.finish().expect("finish archive");
    }
}

pub fn options(cache_root: &Path, self_loop: bool) -> DatasetOptions {
    DatasetOptions {
        config: RedditConfig::new(self_loop),
        cache_root: cache_root.to_path_buf(),
        base_url: MIRROR_URL.to_string(),
        expected_archive_sha256: None,
    }
}

pub fn mirror_fetcher(mirror: &Path, metrics: &Arc<FetchMetricsCollector>) -> Fetcher {
    Fetcher::new(
        Box::new(LocalMirrorSource::new(mirror)),
        Box::new(ZipExtractor),
    )
    .with_instrumentation(metrics.clone())
}
