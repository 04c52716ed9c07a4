use std::collections::BTreeMap;

use super::{RecordPatch, WindowRecord};

/// Table of window state keyed by window identifier.
///
/// The store does no validation beyond the shape of a [`RecordPatch`]; the
/// manager is responsible for keeping the flag invariants.
#[derive(Debug, Clone, Default)]
pub struct WindowRecordStore {
    records: BTreeMap<String, WindowRecord>,
}

impl WindowRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Apply `patch` to the record for `id`, creating a blank hidden record
    /// first when none exists.
    pub fn upsert(&mut self, id: &str, patch: RecordPatch) -> &WindowRecord {
        let record = self.records.entry(id.to_string()).or_insert_with(|| {
            tracing::trace!(window_id = %id, "created window record");
            WindowRecord::new(id)
        });
        record.apply(&patch);
        record
    }

    pub fn remove(&mut self, id: &str) -> Option<WindowRecord> {
        self.records.remove(id)
    }

    pub fn all(&self) -> impl Iterator<Item = &WindowRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
