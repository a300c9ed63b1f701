//! The ordered working set of files
//!
//! Record order here is authoritative: it determines merge output page
//! order, and the upload/operation requests must use the set's order at
//! the moment an action is triggered. [`FileSet::snapshot`] captures that
//! order (with the raw bytes) so an in-flight operation is insulated from
//! concurrent mutations.

use crate::intake::FileRecord;
use tracing::debug;

/// Bytes and identity of one record, captured at upload time.
#[derive(Debug, Clone)]
pub struct UploadSource {
    pub client_id: String,
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Ordered collection of intake records for one tool session.
#[derive(Debug, Default)]
pub struct FileSet {
    records: Vec<FileRecord>,
    dragged: Option<String>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add records at the end, preserving arrival order.
    pub fn append(&mut self, records: Vec<FileRecord>) {
        self.records.extend(records);
    }

    /// Remove exactly one record by client id; no-op when absent.
    pub fn remove(&mut self, id: &str) {
        if let Some(pos) = self.records.iter().position(|r| r.id == id) {
            self.records.remove(pos);
        }
        if self.dragged.as_deref() == Some(id) {
            self.dragged = None;
        }
    }

    /// Move the record at `from` so it ends up at `to`.
    ///
    /// A pure positional move (remove then reinsert), not a swap.
    pub fn reorder(&mut self, from: usize, to: usize) {
        if from == to || from >= self.records.len() || to >= self.records.len() {
            return;
        }
        let record = self.records.remove(from);
        self.records.insert(to, record);
    }

    /// Mark a record as the current drag source.
    pub fn begin_drag(&mut self, id: &str) {
        self.dragged = Some(id.to_string());
    }

    /// Drop the dragged record onto `target_index`.
    ///
    /// The dragged record's current index is looked up fresh here, so a
    /// removal or reorder that happened mid-drag is tolerated; if the
    /// record is gone the drop is a no-op.
    pub fn drop_on(&mut self, target_index: usize) {
        let Some(id) = self.dragged.take() else {
            return;
        };
        let Some(from) = self.records.iter().position(|r| r.id == id) else {
            debug!(id = %id, "dragged record no longer in set, ignoring drop");
            return;
        };
        self.reorder(from, target_index);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Client ids in the exact visual order.
    pub fn ordered_ids(&self) -> Vec<String> {
        self.records.iter().map(|r| r.id.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Capture the set's current order and bytes for an upload attempt.
    ///
    /// The caller must build both the upload and the follow-up operation
    /// request from this snapshot, never from the live set.
    pub fn snapshot(&self) -> Vec<UploadSource> {
        self.records
            .iter()
            .map(|r| UploadSource {
                client_id: r.id.clone(),
                name: r.name.clone(),
                bytes: r.bytes.clone(),
            })
            .collect()
    }

    /// Record the server-assigned id for a client record.
    ///
    /// No-op if the record was removed mid-flight or already has an id;
    /// a backend id is immutable once set.
    pub fn assign_backend_id(&mut self, client_id: &str, backend_id: &str) {
        if let Some(record) = self.records.iter_mut().find(|r| r.id == client_id) {
            if record.backend_file_id.is_none() {
                record.backend_file_id = Some(backend_id.to_string());
            }
        }
    }

    /// Drop everything, returning the session to its initial state.
    pub fn clear(&mut self) {
        self.records.clear();
        self.dragged = None;
    }
}
