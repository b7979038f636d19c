//! Record collection persisted under [`POLICIES_KEY`](crate::POLICIES_KEY)

use crate::{KeyValueStore, Persisted, Result, StoreError, POLICIES_KEY};
use mswasth_record::{PolicyRecord, RecordId};
use std::sync::Arc;

/// Ordered record collection with write-through persistence
#[derive(Debug)]
pub struct PolicyRepository {
    records: Persisted<Vec<PolicyRecord>>,
}

impl PolicyRepository {
    /// Load the collection from `store`; empty if absent or unreadable
    ///
    /// Unreadable collections are backed up first, see [`Persisted`].
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let records = Persisted::load(store, POLICIES_KEY, Vec::new());
        tracing::debug!(count = records.get().len(), writable = records.is_writable(), "loaded policy records");
        Self { records }
    }

    /// All records in insertion order
    #[inline]
    #[must_use]
    pub fn all(&self) -> &[PolicyRecord] {
        self.records.get()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.get().len()
    }

    /// Whether the collection is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.get().is_empty()
    }

    /// Record with identifier `id`
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&PolicyRecord> {
        self.records.get().iter().find(|r| &r.id == id)
    }

    /// Append `record`, returning the identifier it was stored under
    ///
    /// A non-empty identifier not yet in the collection is kept; otherwise a
    /// fresh one is generated.
    pub fn insert_new(&mut self, mut record: PolicyRecord) -> Result<RecordId> {
        let mut id = record.id.clone();
        while id.is_empty() || self.get(&id).is_some() {
            id = RecordId::generate();
        }
        record.id = id.clone();
        self.records.update(|records| records.push(record))?;
        tracing::info!(id = %id, "added policy record");
        Ok(id)
    }

    /// Replace the record with the same identifier, keeping its position
    pub fn replace(&mut self, record: PolicyRecord) -> Result<()> {
        let Some(index) = self.position(&record.id) else {
            return Err(StoreError::NotFound(record.id));
        };
        let id = record.id.clone();
        self.records.update(|records| records[index] = record)?;
        tracing::info!(id = %id, "updated policy record");
        Ok(())
    }

    /// Remove the record with identifier `id`
    ///
    /// Returns whether a record was removed; removing an unknown id is a no-op.
    pub fn delete(&mut self, id: &RecordId) -> Result<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        self.records.update(|records| {
            records.remove(index);
        })?;
        tracing::info!(id = %id, "deleted policy record");
        Ok(true)
    }

    /// Remove every record
    pub fn delete_all(&mut self) -> Result<()> {
        let count = self.len();
        self.records.replace(Vec::new())?;
        tracing::info!(count, "deleted all policy records");
        Ok(())
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.get().iter().position(|r| &r.id == id)
    }
}
