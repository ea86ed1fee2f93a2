//! # Record Store
//!
//! Ordered in-memory collection of asset records. Order is insertion order
//! and drives both pagination and export.

use crate::core::record::{AssetRecord, RecordId};

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<AssetRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, dropping any duplicate ids.
    pub fn from_records(records: Vec<AssetRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            if !store.insert(record) {
                log::warn!("Skipping record with duplicate id");
            }
        }
        store
    }

    /// Append a record. Returns `false` (and leaves the store untouched) if
    /// the id is already present.
    pub fn insert(&mut self, record: AssetRecord) -> bool {
        if self.contains(&record.id) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Replace the record with the same id, keeping its position.
    pub fn update(&mut self, record: AssetRecord) -> bool {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &RecordId) -> Option<AssetRecord> {
        let index = self.records.iter().position(|r| &r.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: &RecordId) -> Option<&AssetRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.records.iter().any(|r| &r.id == id)
    }

    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
