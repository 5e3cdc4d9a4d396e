// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::StoreErrorCode;

pub trait FetchInstrumentation: Send + Sync + 'static {
    fn observe_download(&self, _source: &str, _bytes: u64, _latency: Duration) {}
    fn observe_extract(&self, _entries: usize, _latency: Duration) {}
    fn observe_error(&self, _source: &str, _code: StoreErrorCode) {}
}

#[derive(Debug, Default)]
pub struct NoopInstrumentation;

impl FetchInstrumentation for NoopInstrumentation {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchMetrics {
    pub downloads: u64,
    pub bytes_downloaded: u64,
    pub extractions: u64,
    pub entries_extracted: u64,
    pub latency_ms_total: u128,
    pub failures_by_code: BTreeMap<String, u64>,
}

/// Aggregates fetch observations in memory.
#[derive(Debug, Default)]
pub struct FetchMetricsCollector {
    inner: Mutex<FetchMetrics>,
}

impl FetchMetricsCollector {
    #[must_use]
    pub fn snapshot(&self) -> FetchMetrics {
        self.inner.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl FetchInstrumentation for FetchMetricsCollector {
    fn observe_download(&self, _source: &str, bytes: u64, latency: Duration) {
        if let Ok(mut m) = self.inner.lock() {
            m.downloads = m.downloads.saturating_add(1);
            m.bytes_downloaded = m.bytes_downloaded.saturating_add(bytes);
            m.latency_ms_total = m.latency_ms_total.saturating_add(latency.as_millis());
        }
    }

    fn observe_extract(&self, entries: usize, latency: Duration) {
        if let Ok(mut m) = self.inner.lock() {
            m.extractions = m.extractions.saturating_add(1);
            m.entries_extracted = m.entries_extracted.saturating_add(entries as u64);
            m.latency_ms_total = m.latency_ms_total.saturating_add(latency.as_millis());
        }
    }

    fn observe_error(&self, _source: &str, code: StoreErrorCode) {
        if let Ok(mut m) = self.inner.lock() {
            *m.failures_by_code
                .entry(code.as_str().to_string())
                .or_insert(0) += 1;
        }
    }
}
