// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
//! Acquisition side of the dataset cache: archive sources, extraction and
//! the single-remediation policy wrapped around decoding.

mod error;
mod extract;
mod fetcher;
mod instrumentation;
mod remediation;
mod source;

pub use error::{StoreError, StoreErrorCode};
pub use extract::{staging_path, ArchiveExtractor, ZipExtractor};
pub use fetcher::{FetchReport, Fetcher};
pub use instrumentation::{
    FetchInstrumentation, FetchMetrics, FetchMetricsCollector, NoopInstrumentation,
};
pub use remediation::{run_with_remediation, RemediationError, RemediationState};
pub use source::{part_path, ArchiveSource, HttpArchiveSource, LocalMirrorSource};

pub const CRATE_NAME: &str = "redgraph-store";
