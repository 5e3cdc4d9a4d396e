// SPDX-License-Identifier: Apache-2.0

use std::cell::RefCell;
use std::sync::Arc;

use redgraph_ingest::{decode_graph, load_attributes, IngestError, IntegrityError};
use redgraph_model::{
    CachePaths, DatasetSummary, Graph, NodeAttributes, NodeData, RedditConfig, Split, SplitMasks,
    NDATA_FEAT, NDATA_LABEL, NUM_CLASSES,
};
use redgraph_store::{run_with_remediation, Fetcher, RemediationState};
use tracing::{debug, info, warn};

use crate::error::{DatasetError, UsageError};
use crate::logging::{LoadEvent, LoadLog, LoadStage};
use crate::options::DatasetOptions;

const ITEM_COUNT: usize = 1;

/// The Reddit post graph exposed as a single-item dataset.
///
/// Construction locates the cache, decodes it and, if decoding fails once,
/// re-fetches the archive and decodes again. The decoded graph is kept for
/// the lifetime of the value; every [`RedditDataset::get`] re-attaches the
/// split masks, features and labels to it and hands out the same `Arc`.
#[derive(Debug)]
pub struct RedditDataset {
    options: DatasetOptions,
    paths: CachePaths,
    graph: Arc<Graph>,
    attributes: NodeAttributes,
    masks: SplitMasks,
    summary: DatasetSummary,
    remediation: RemediationState,
    log: LoadLog,
}

impl RedditDataset {
    /// Loads the requested variant from the default cache root, downloading
    /// from the public mirror when needed.
    pub fn new(self_loop: bool) -> Result<Self, DatasetError> {
        Self::with_options(&DatasetOptions::new(self_loop))
    }

    pub fn with_options(options: &DatasetOptions) -> Result<Self, DatasetError> {
        Self::with_fetcher(options, Fetcher::http())
    }

    pub fn with_fetcher(options: &DatasetOptions, fetcher: Fetcher) -> Result<Self, DatasetError> {
        Self::with_fetcher_and_log(options, fetcher, &mut LoadLog::default())
    }

    /// Like [`RedditDataset::with_fetcher`], appending pipeline events to
    /// `log` as they happen. The events stay in `log` when loading fails.
    pub fn with_fetcher_and_log(
        options: &DatasetOptions,
        fetcher: Fetcher,
        log: &mut LoadLog,
    ) -> Result<Self, DatasetError> {
        let paths = options.paths();
        debug!(
            archive = %paths.archive.display(),
            extract_dir = %paths.extract_dir.display(),
            url = %paths.remote_url,
            "resolved cache paths"
        );
        log.emit(
            LoadStage::Locate,
            "cache_paths",
            [
                ("archive", paths.archive.display().to_string()),
                ("extract_dir", paths.extract_dir.display().to_string()),
                ("remote_url", paths.remote_url.clone()),
            ],
        );

        let cell = RefCell::new(std::mem::take(log));
        let outcome = run_with_remediation(
            |state| {
                let decoded = decode_cache(&paths);
                let mut log = cell.borrow_mut();
                match &decoded {
                    Ok((graph, _)) => log.emit(
                        LoadStage::Decode,
                        "decoded",
                        [
                            ("state", state.as_str().to_string()),
                            ("num_nodes", graph.num_nodes().to_string()),
                        ],
                    ),
                    Err(e) => log.emit(
                        LoadStage::Decode,
                        "failed",
                        [
                            ("state", state.as_str().to_string()),
                            ("error", e.to_string()),
                        ],
                    ),
                }
                decoded
            },
            |cause| {
                warn!(
                    error = %cause,
                    extract_dir = %paths.extract_dir.display(),
                    "cache unreadable, fetching a fresh copy"
                );
                let fetched =
                    fetcher.remediate(&paths, options.expected_archive_sha256.as_deref());
                let mut log = cell.borrow_mut();
                match &fetched {
                    Ok(report) => log.emit(
                        LoadStage::Remediate,
                        "fetched",
                        [
                            ("source", fetcher.source_name().to_string()),
                            ("bytes", report.bytes_downloaded.to_string()),
                            ("entries", report.entries_extracted.to_string()),
                        ],
                    ),
                    Err(e) => log.emit(
                        LoadStage::Remediate,
                        "failed",
                        [
                            ("source", fetcher.source_name().to_string()),
                            ("error", e.to_string()),
                        ],
                    ),
                }
                fetched.map(|_| ())
            },
        );
        *log = cell.into_inner();
        let ((graph, attributes), remediation) = outcome?;
        if remediation == RemediationState::Remediated {
            info!(dataset = %options.config, "cache remediated");
        }

        let masks = SplitMasks::from_node_types(attributes.node_type.view());
        let counts = masks.counts();
        let summary = DatasetSummary {
            num_nodes: graph.num_nodes(),
            num_edges: graph.num_edges(),
            num_feats: attributes.feature_width(),
            num_classes: NUM_CLASSES,
            num_train: counts.train,
            num_val: counts.val,
            num_test: counts.test,
        };

        let mut dataset = Self {
            options: options.clone(),
            paths,
            graph: Arc::new(graph),
            attributes,
            masks,
            summary,
            remediation,
            log: LoadLog::default(),
        };
        dataset.attach()?;
        log.emit(
            LoadStage::Attach,
            "node_data",
            [("keys", dataset.graph.ndata_keys().join(","))],
        );

        info!(
            dataset = %dataset.options.config,
            num_nodes = summary.num_nodes,
            num_edges = summary.num_edges,
            num_feats = summary.num_feats,
            num_classes = summary.num_classes,
            num_train = summary.num_train,
            num_val = summary.num_val,
            num_test = summary.num_test,
            "dataset loaded"
        );
        log.emit(
            LoadStage::Summarize,
            "summary",
            [
                ("num_nodes", summary.num_nodes),
                ("num_edges", summary.num_edges),
                ("num_feats", summary.num_feats),
                ("num_classes", summary.num_classes),
                ("num_train", summary.num_train),
                ("num_val", summary.num_val),
                ("num_test", summary.num_test),
            ],
        );
        dataset.log = log.clone();
        Ok(dataset)
    }

    /// Always 1: the whole graph is the only item.
    #[must_use]
    pub const fn len(&self) -> usize {
        ITEM_COUNT
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns the graph with `train_mask`, `val_mask`, `test_mask`, `feat`
    /// and `label` attached. Only index 0 exists.
    pub fn get(&self, index: usize) -> Result<Arc<Graph>, DatasetError> {
        if index >= ITEM_COUNT {
            return Err(DatasetError::Usage(UsageError {
                index,
                len: ITEM_COUNT,
            }));
        }
        self.attach()?;
        Ok(Arc::clone(&self.graph))
    }

    fn attach(&self) -> Result<(), IntegrityError> {
        for split in Split::ALL {
            self.graph
                .set_ndata(split.mask_name(), NodeData::Bool(self.masks.mask(split).clone()))?;
        }
        self.graph
            .set_ndata(NDATA_FEAT, NodeData::Float32(self.attributes.feature.clone()))?;
        self.graph
            .set_ndata(NDATA_LABEL, NodeData::Int64(self.attributes.label.clone()))?;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> RedditConfig {
        self.options.config
    }

    #[must_use]
    pub fn options(&self) -> &DatasetOptions {
        &self.options
    }

    #[must_use]
    pub fn paths(&self) -> &CachePaths {
        &self.paths
    }

    #[must_use]
    pub const fn num_classes(&self) -> usize {
        NUM_CLASSES
    }

    #[must_use]
    pub fn summary(&self) -> &DatasetSummary {
        &self.summary
    }

    #[must_use]
    pub fn attributes(&self) -> &NodeAttributes {
        &self.attributes
    }

    #[must_use]
    pub fn masks(&self) -> &SplitMasks {
        &self.masks
    }

    /// Whether loading needed a fresh fetch.
    #[must_use]
    pub fn remediation(&self) -> RemediationState {
        self.remediation
    }

    #[must_use]
    pub fn events(&self) -> &[LoadEvent] {
        self.log.events()
    }

    #[must_use]
    pub fn log(&self) -> &LoadLog {
        &self.log
    }
}

fn decode_cache(paths: &CachePaths) -> Result<(Graph, NodeAttributes), IngestError> {
    let graph = decode_graph(&paths.graph_file)?;
    let attributes = load_attributes(&paths.data_file, graph.num_nodes())?;
    Ok((graph, attributes))
}
