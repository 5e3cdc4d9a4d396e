// SPDX-License-Identifier: Apache-2.0

mod support;

use std::io;
use std::sync::{Arc, Mutex};

use redgraph_dataset::{LoadStage, RedditConfig, RedditDataset};
use support::{mirror_fetcher, options, Fixture};
use tempfile::tempdir;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter(Arc::clone(&self.0))
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("lock poisoned"))?;
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn json_lines(sink: &SharedBuffer) -> Vec<serde_json::Value> {
    let bytes = sink.0.lock().expect("lock output").clone();
    String::from_utf8(bytes)
        .expect("utf8 log output")
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("json log line"))
        .collect()
}

#[test]
fn load_summary_is_logged_once_with_structured_fields() {
    let mirror = tempdir().expect("mirror");
    let cache = tempdir().expect("cache");
    Fixture::default().publish(mirror.path(), RedditConfig::new(false));
    let sink = SharedBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .json()
        .with_max_level(Level::INFO)
        .finish();

    let dataset = tracing::subscriber::with_default(subscriber, || {
        let dataset = RedditDataset::with_fetcher(
            &options(cache.path(), false),
            mirror_fetcher(mirror.path(), &Arc::default()),
        )
        .expect("load");
        dataset.get(0).expect("item 0");
        dataset.get(0).expect("item 0 again");
        dataset
    });

    let lines = json_lines(&sink);
    let summaries: Vec<&serde_json::Value> = lines
        .iter()
        .filter(|l| {
            l.pointer("/fields/message").and_then(|v| v.as_str()) == Some("dataset loaded")
        })
        .collect();
    assert_eq!(summaries.len(), 1, "summary must be logged exactly once");
    let fields = summaries[0].get("fields").expect("fields object");
    assert_eq!(fields.get("dataset").and_then(|v| v.as_str()), Some("reddit"));
    assert_eq!(fields.get("num_nodes").and_then(|v| v.as_u64()), Some(6));
    assert_eq!(fields.get("num_edges").and_then(|v| v.as_u64()), Some(7));
    assert_eq!(fields.get("num_classes").and_then(|v| v.as_u64()), Some(41));
    assert_eq!(fields.get("num_train").and_then(|v| v.as_u64()), Some(3));

    let warned = lines
        .iter()
        .any(|l| l.get("level").and_then(|v| v.as_str()) == Some("WARN"));
    assert!(warned, "cold cache must warn before remediating");

    let summary_event = dataset
        .events()
        .iter()
        .find(|e| e.stage == LoadStage::Summarize)
        .expect("summary event");
    assert_eq!(summary_event.fields.get("num_val").map(String::as_str), Some("1"));
    let encoded = serde_json::to_string(summary_event).expect("serialize event");
    assert!(encoded.contains("\"stage\":\"summarize\""), "{encoded}");
}

#[test]
fn summary_display_lists_one_count_per_line() {
    let mirror = tempdir().expect("mirror");
    let cache = tempdir().expect("cache");
    Fixture::default().publish(mirror.path(), RedditConfig::new(false));
    let dataset = RedditDataset::with_fetcher(
        &options(cache.path(), false),
        mirror_fetcher(mirror.path(), &Arc::default()),
    )
    .expect("load");

    assert_eq!(
        dataset.summary().to_string(),
        "NumNodes: 6\nNumEdges: 7\nNumFeats: 3\nNumClasses: 41\n\
         NumTrainingSamples: 3\nNumValidationSamples: 1\nNumTestSamples: 1"
    );
    let json = serde_json::to_value(dataset.summary()).expect("summary json");
    assert_eq!(json.get("num_test").and_then(|v| v.as_u64()), Some(1));
}
