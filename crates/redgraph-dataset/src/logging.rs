// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStage {
    Locate,
    Decode,
    Remediate,
    Attach,
    Summarize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadEvent {
    pub stage: LoadStage,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

/// Append-only record of what the load pipeline did, in order.
#[derive(Debug, Default, Clone)]
pub struct LoadLog {
    events: Vec<LoadEvent>,
}

impl LoadLog {
    pub fn emit<I, K, V>(&mut self, stage: LoadStage, name: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.events.push(LoadEvent {
            stage,
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        });
    }

    #[must_use]
    pub fn events(&self) -> &[LoadEvent] {
        &self.events
    }

    #[must_use]
    pub fn count(&self, stage: LoadStage, name: &str) -> usize {
        self.events
            .iter()
            .filter(|e| e.stage == stage && e.name == name)
            .count()
    }
}
